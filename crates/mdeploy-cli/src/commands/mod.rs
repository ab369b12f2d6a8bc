mod deploy;

pub use deploy::{Action, deploy};
