pub mod keylab;
