mod encoded;
mod engine;
mod pika;

pub use encoded::*;
pub use pika::*;
