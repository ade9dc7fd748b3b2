//! # Vocabulary IO
//!
//! Trained tokenizers persist as a versioned JSON [`ModelRecord`].
//!
//! ## Saving and Loading A Model
//!
//! ```rust,no_run
//! use wordforge::{
//!     Tokenizer,
//!     vocab::io::{load_model_path, save_model_path},
//! };
//!
//! fn example(tokenizer: &Tokenizer) -> wordforge::WFResult<Tokenizer> {
//!     save_model_path(tokenizer, "model.json")?;
//!     load_model_path("model.json")
//! }
//! ```

mod model_io;
mod model_record;

#[doc(inline)]
pub use model_io::*;
#[doc(inline)]
pub use model_record::*;
