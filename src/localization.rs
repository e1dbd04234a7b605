use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};
use unic_langid::LanguageIdentifier;

/// Language used for every chat; the menu is only published in English.
pub const DEFAULT_LANGUAGE: &str = "en";

const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for the menu bot
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with the embedded English resource
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        let en_locale: LanguageIdentifier = DEFAULT_LANGUAGE.parse()?;
        let bundle = Self::create_bundle(&en_locale, EN_RESOURCE)?;
        bundles.insert(DEFAULT_LANGUAGE.to_string(), Arc::new(bundle));

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale from FTL source
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram renders the bidi isolation marks literally.
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("invalid FTL resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("duplicate FTL entries for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let Some(bundle) = self.bundles.get(DEFAULT_LANGUAGE) else {
            return format!("Missing translation: {key}");
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(*k, FluentValue::from(*v));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, errors = ?errors, "Fluent reported errors while formatting message");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }
}

static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager
pub fn init_localization() -> Result<()> {
    let manager = LocalizationManager::new()?;
    // A concurrent initializer may have won the race; both hold the same resource.
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager, initializing it on first use
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(|| {
        LocalizationManager::new().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load localization resources");
            LocalizationManager {
                bundles: HashMap::new(),
            }
        })
    })
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message_with_args(key, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_resource_parses() {
        assert!(LocalizationManager::new().is_ok());
    }

    #[test]
    fn test_placeables_are_not_isolated() {
        let manager = LocalizationManager::new().unwrap();
        let message = manager.get_message_with_args("menu-page-indicator", &[("page", "2"), ("total", "9")]);
        assert_eq!(message, "📄 Page 2 of 9");
    }
}
