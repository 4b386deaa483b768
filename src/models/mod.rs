// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model catalog and selection
//!
//! Provides the priority-ordered catalog of pretrained int8 model variants
//! and the selection policy that maps a purpose, a memory budget and an
//! optional license filter to one of them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use languagemodels::models::{select_name, Catalog, LicenseFilter, Purpose};
//!
//! let catalog = Catalog::builtin();
//! let apache = LicenseFilter::new("apache*")?;
//! let name = select_name(&catalog, Purpose::Instruct, 1.0, apache.as_ref(), None)?;
//! assert_eq!(name, "flan-t5-large-ct2-int8");
//! ```

pub mod catalog;
pub mod schema;
pub mod selector;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogFile};
pub use schema::{
    Architecture, ComputeType, ModelDescriptor, Purpose, Quantization, RuntimeKind,
    TokenizerRecipe, MODEL_CONFIG, MODEL_WEIGHTS, TOKENIZER_DEFINITION,
};
pub use selector::{select, select_name, LicenseFilter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let catalog = Catalog::builtin();
        let model = select(&catalog, Purpose::Embedding, 0.40, None).unwrap();
        assert_eq!(model.architecture.runtime_kind(), RuntimeKind::Encoder);
    }
}
