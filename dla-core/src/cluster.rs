use crate::types::ParticleIndex;
use glam::Vec2;

/// A frozen cluster member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub index: ParticleIndex,
}

/// Append-only sequence of frozen particles in deposition order.
///
/// The only way to grow a cluster is [`Cluster::accept`], which assigns the
/// next index, so `cluster[i].index == i` always holds. Past entries are
/// never mutated or removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cluster {
    particles: Vec<Particle>,
}

impl Cluster {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(1024),
        }
    }

    /// Freezes a particle at `pos` and returns its newly assigned index.
    pub fn accept(&mut self, pos: Vec2) -> ParticleIndex {
        let index = self.particles.len();
        self.particles.push(Particle { pos, index });
        index
    }

    /// Index the next accepted particle would receive.
    pub fn next_index(&self) -> ParticleIndex {
        self.particles.len()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: ParticleIndex) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn last(&self) -> Option<&Particle> {
        self.particles.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Distance from `target` to the furthest particle, or `0.0` if empty.
    pub fn max_radius(&self, target: Vec2) -> f32 {
        self.particles
            .iter()
            .map(|p| (p.pos - target).length())
            .fold(0.0, f32::max)
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
