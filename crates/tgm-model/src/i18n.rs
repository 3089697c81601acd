//! # Localization Lookup
//!
//! Labels and hints for types, fields and enum values, in any number of
//! languages. Loading translation files is not the model's concern; the
//! model only holds the bundles that came in with its declarations and
//! answers lookups against a caller-supplied language resolution order.
//!
//! Each property resolves independently: a type's `label` may come from
//! `de` while its `hint` falls back to `en`.

use serde::Serialize;

use crate::config::{LabelConfig, LocalizationConfig, TypeLocalizationConfig};
use crate::model::Model;
use crate::types::Type;
use crate::validation::ValidationContext;

/// Localized strings for a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeLocalization {
    pub label: Option<String>,
    pub label_plural: Option<String>,
    pub hint: Option<String>,
}

/// Localized strings for a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLocalization {
    pub label: Option<String>,
    pub hint: Option<String>,
}

/// Localized strings for an enum value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueLocalization {
    pub label: Option<String>,
    pub hint: Option<String>,
}

/// The localization bundles declared alongside a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localizations {
    bundles: Vec<LocalizationConfig>,
}

impl Localizations {
    pub(crate) fn new(bundles: Vec<LocalizationConfig>) -> Self {
        Self { bundles }
    }

    /// Distinct languages, in order of first declaration.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = Vec::new();
        for bundle in &self.bundles {
            if !languages.contains(&bundle.language.as_str()) {
                languages.push(&bundle.language);
            }
        }
        languages
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Entries for `type_name`, most preferred first.
    fn type_entries<'a>(
        &'a self,
        type_name: &'a str,
        resolution_order: &'a [&'a str],
    ) -> impl Iterator<Item = &'a TypeLocalizationConfig> + 'a {
        resolution_order.iter().flat_map(move |language| {
            self.bundles
                .iter()
                .filter(move |b| b.language == *language)
                .filter_map(move |b| b.types.get(type_name))
        })
    }

    pub(crate) fn validate(&self, model: &Model, ctx: &mut ValidationContext) {
        for bundle in &self.bundles {
            let language = &bundle.language;
            let loc = bundle.location.as_ref();
            for (type_name, entry) in &bundle.types {
                let Some(ty) = model.get_type(type_name) else {
                    ctx.warn(
                        format!(
                            "Localization for language \"{language}\" refers to unknown type \"{type_name}\"."
                        ),
                        loc,
                    );
                    continue;
                };

                let object = ty.as_object();
                for field_name in entry.fields.keys() {
                    if object.and_then(|o| o.field(field_name)).is_none() {
                        ctx.warn(
                            format!(
                                "Localization for language \"{language}\" refers to unknown field \"{type_name}.{field_name}\"."
                            ),
                            loc,
                        );
                    }
                }

                let enum_type = match ty {
                    Type::Enum(e) => Some(e),
                    _ => None,
                };
                for value in entry.values.keys() {
                    if enum_type.and_then(|e| e.value(value)).is_none() {
                        ctx.warn(
                            format!(
                                "Localization for language \"{language}\" refers to unknown enum value \"{type_name}.{value}\"."
                            ),
                            loc,
                        );
                    }
                }
            }
        }
    }

    /// Look up a type's strings. `resolution_order` lists languages from
    /// most to least preferred.
    pub fn type_localization(&self, type_name: &str, resolution_order: &[&str]) -> TypeLocalization {
        let entries: Vec<&TypeLocalizationConfig> =
            self.type_entries(type_name, resolution_order).collect();
        TypeLocalization {
            label: resolve(entries.iter().copied(), |e| e.label.as_ref()),
            label_plural: resolve(entries.iter().copied(), |e| e.label_plural.as_ref()),
            hint: resolve(entries.iter().copied(), |e| e.hint.as_ref()),
        }
    }

    pub fn field_localization(
        &self,
        type_name: &str,
        field_name: &str,
        resolution_order: &[&str],
    ) -> FieldLocalization {
        let labels: Vec<&LabelConfig> = self
            .type_entries(type_name, resolution_order)
            .filter_map(|e| e.fields.get(field_name))
            .collect();
        FieldLocalization {
            label: resolve(labels.iter().copied(), |l| l.label.as_ref()),
            hint: resolve(labels.iter().copied(), |l| l.hint.as_ref()),
        }
    }

    pub fn enum_value_localization(
        &self,
        enum_name: &str,
        value: &str,
        resolution_order: &[&str],
    ) -> EnumValueLocalization {
        let labels: Vec<&LabelConfig> = self
            .type_entries(enum_name, resolution_order)
            .filter_map(|e| e.values.get(value))
            .collect();
        EnumValueLocalization {
            label: resolve(labels.iter().copied(), |l| l.label.as_ref()),
            hint: resolve(labels.iter().copied(), |l| l.hint.as_ref()),
        }
    }
}

fn resolve<'a, T: 'a>(
    entries: impl Iterator<Item = &'a T>,
    property: impl Fn(&'a T) -> Option<&'a String>,
) -> Option<String> {
    entries.filter_map(property).next().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundles() -> Localizations {
        let de: LocalizationConfig = serde_json::from_value(serde_json::json!({
            "language": "de",
            "types": {
                "Shipment": {
                    "label": "Lieferung",
                    "fields": {"deliveries": {"label": "Zustellungen"}}
                },
                "TransportKind": {"values": {"AIR": {"label": "Luft"}}}
            }
        }))
        .unwrap();
        let en: LocalizationConfig = serde_json::from_value(serde_json::json!({
            "language": "en",
            "types": {
                "Shipment": {
                    "label": "Shipment",
                    "labelPlural": "Shipments",
                    "hint": "A consignment",
                    "fields": {"deliveries": {"label": "Deliveries", "hint": "All deliveries"}}
                },
                "TransportKind": {"values": {"AIR": {"label": "Air", "hint": "By plane"}}}
            }
        }))
        .unwrap();
        Localizations::new(vec![de, en])
    }

    #[test]
    fn test_languages_in_declaration_order() {
        assert_eq!(bundles().languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_type_properties_resolve_independently() {
        let l = bundles().type_localization("Shipment", &["de", "en"]);
        assert_eq!(l.label.as_deref(), Some("Lieferung"));
        assert_eq!(l.label_plural.as_deref(), Some("Shipments"));
        assert_eq!(l.hint.as_deref(), Some("A consignment"));
    }

    #[test]
    fn test_resolution_order_is_respected() {
        let l = bundles().type_localization("Shipment", &["en", "de"]);
        assert_eq!(l.label.as_deref(), Some("Shipment"));
    }

    #[test]
    fn test_field_localization_falls_back() {
        let l = bundles().field_localization("Shipment", "deliveries", &["de", "en"]);
        assert_eq!(l.label.as_deref(), Some("Zustellungen"));
        assert_eq!(l.hint.as_deref(), Some("All deliveries"));
    }

    #[test]
    fn test_enum_value_localization() {
        let l = bundles().enum_value_localization("TransportKind", "AIR", &["de"]);
        assert_eq!(l.label.as_deref(), Some("Luft"));
        assert_eq!(l.hint, None);
    }

    #[test]
    fn test_unknown_language_yields_nothing() {
        let l = bundles().type_localization("Shipment", &["fr"]);
        assert_eq!(l, TypeLocalization::default());
    }
}
