pub mod deadline;
pub mod probe;
pub mod resolver;
pub mod storage;
pub mod theme;
