//! Domain services
//!
//! Pure, synchronous logic operating on archive bytes and domain entities.

pub mod analyzer;
pub mod boundary;
pub mod correlator;
pub mod icon_set;
pub mod scale;
pub mod scanner;
pub mod signature_catalog;
pub mod structural_parser;
pub mod validator;

pub use analyzer::CatalogAnalyzer;
pub use boundary::BoundaryResolver;
pub use correlator::Correlator;
pub use icon_set::IconSetAggregator;
pub use scale::ScaleInferer;
pub use scanner::SignatureScanner;
pub use signature_catalog::SignatureCatalog;
pub use structural_parser::{ParsedCatalog, StructuralParser};
pub use validator::{PayloadValidator, ValidationResult};
