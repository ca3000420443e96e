use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::future::Future;
use web_sys::HtmlImageElement;

/// A logical image name and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub key: String,
    pub source: String,
}

impl Locator {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Locator {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// Decoded images keyed by logical name. Only built once every image has
/// loaded.
pub struct AssetStore<I = HtmlImageElement> {
    images: HashMap<String, I>,
}

impl<I> AssetStore<I> {
    pub fn get(&self, key: &str) -> Option<&I> {
        self.images.get(key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Starts every load at once and resolves when all are done. The first
/// failure rejects the whole store; nothing is retried and no partial store
/// is returned.
pub async fn load_assets<I, F, Fut>(locators: Vec<Locator>, loader: F) -> Result<AssetStore<I>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<I>>,
{
    let loads = locators.into_iter().map(|Locator { key, source }| {
        let pending = loader(source.clone());
        async move {
            let image = pending
                .await
                .with_context(|| format!("Failed to load asset '{}' from '{}'", key, source))?;
            Ok::<_, anyhow::Error>((key, image))
        }
    });

    let images = try_join_all(loads).await?;
    Ok(AssetStore {
        images: images.into_iter().collect(),
    })
}
