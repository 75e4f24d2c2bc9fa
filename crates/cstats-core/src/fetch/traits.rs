//! Listings source trait definition.

use super::types::FetchOutcome;

/// Something that can pull the listings once and persist the result.
///
/// A single call is a single attempt; retry policy belongs to the caller.
pub trait ListingsSource: Send + Sync {
    /// Perform one pull. On `Success` the snapshot has been replaced.
    fn fetch(&self) -> FetchOutcome;
}

impl<T: ListingsSource + ?Sized> ListingsSource for Box<T> {
    fn fetch(&self) -> FetchOutcome {
        (**self).fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(FetchOutcome);

    impl ListingsSource for FixedSource {
        fn fetch(&self) -> FetchOutcome {
            self.0.clone()
        }
    }

    #[test]
    fn test_source_usable_as_trait_object() {
        let source: Box<dyn ListingsSource> = Box::new(FixedSource(FetchOutcome::ApiError {
            status: 429,
        }));
        assert_eq!(source.fetch(), FetchOutcome::ApiError { status: 429 });
    }
}
