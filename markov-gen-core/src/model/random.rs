use rand::Rng;
use rand::rngs::StdRng;

/// Produces uniform values in `[0, 1)`, one per sampled character.
///
/// Implemented for `StdRng`; tests can plug in scripted sequences to make
/// generation fully predictable.
pub trait UniformSource {
	fn next_uniform(&mut self) -> f64;
}

impl UniformSource for StdRng {
	fn next_uniform(&mut self) -> f64 {
		// Standard distribution for f64 is [0, 1)
		self.random::<f64>()
	}
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
	fn next_uniform(&mut self) -> f64 {
		(**self).next_uniform()
	}
}
