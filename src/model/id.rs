//! Typed identifiers for storefront records.
//!
//! Every record kind gets its own newtype over `u32` so a `ProductId` can
//! never be passed where an `OrderId` is expected. The [`entity_id!`] macro
//! generates the newtype together with the `From<u32>` conversion used by the
//! per-store counters and a prefixed `Display` form (`product_3`, `order_7`)
//! used in logs and `NotFound` errors.

/// Generates a typed id newtype with `From<u32>` and a prefixed `Display`.
macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        paste::paste! {
            #[doc = "Type-safe identifier for " $prefix " records."]
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                serde::Serialize,
                serde::Deserialize,
            )]
            pub struct $name(pub u32);

            impl From<u32> for $name {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "_{}"), self.0)
                }
            }
        }
    };
}

pub(crate) use entity_id;

#[cfg(test)]
mod tests {
    entity_id!(WidgetId, "widget");

    #[test]
    fn display_uses_prefix() {
        assert_eq!(WidgetId(7).to_string(), "widget_7");
    }

    #[test]
    fn from_u32_round_trips() {
        assert_eq!(WidgetId::from(3), WidgetId(3));
    }
}
