pub mod reference;
pub mod wallet;
