/// Deposition order of a particle in a [`crate::cluster::Cluster`].
///
/// This is an index into the cluster and is assigned exactly once, when the
/// particle freezes. It doubles as the key for the particle's render hue.
pub type ParticleIndex = usize;
