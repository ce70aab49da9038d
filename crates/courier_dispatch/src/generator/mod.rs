pub mod generator_params;
pub mod instance_generator;
