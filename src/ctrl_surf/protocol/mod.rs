pub mod arturia;
