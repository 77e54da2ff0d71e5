pub mod classifiers;
pub mod replay;
pub mod run;
