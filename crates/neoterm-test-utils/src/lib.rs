pub mod fixtures;
pub mod helpers;
pub mod mock_dictionary;

pub use fixtures::*;
pub use helpers::*;
pub use mock_dictionary::MockDictionary;
