pub mod activity;
pub mod people;
pub mod relationship;
pub mod tree;
