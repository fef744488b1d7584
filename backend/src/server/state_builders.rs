//! Builders for HTTP state ports.
//!
//! Each port picks its outbound adapter from [`ServerConfig`]: PostgreSQL when
//! a pool is configured, memory otherwise; imgbb when an API key is set, the
//! placeholder host otherwise.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use reqwest::Url;
use tracing::info;

use chengyu_backend::domain::ports::{
    CategoryCatalogue, CategoryRepository, FixtureImageHost, IdiomCatalogue, IdiomRepository,
    ImageHost, ImageUploads,
};
use chengyu_backend::domain::{CategoryService, IdiomService, ImageUploadService};
use chengyu_backend::inbound::http::state::HttpState;
use chengyu_backend::outbound::imgbb::{IMGBB_UPLOAD_URL, ImgbbImageHost};
use chengyu_backend::outbound::memory::{InMemoryCategoryRepository, InMemoryIdiomRepository};
use chengyu_backend::outbound::persistence::{DieselCategoryRepository, DieselIdiomRepository};

use super::ServerConfig;

const IMGBB_TIMEOUT: Duration = Duration::from_secs(30);

type CataloguePorts = (Arc<dyn IdiomCatalogue>, Arc<dyn CategoryCatalogue>);

fn catalogue_ports<I, C>(idioms: I, categories: C) -> CataloguePorts
where
    I: IdiomRepository + 'static,
    C: CategoryRepository + 'static,
{
    (
        Arc::new(IdiomService::new(Arc::new(idioms))),
        Arc::new(CategoryService::new(Arc::new(categories))),
    )
}

/// Select the repositories backing the idiom and category services.
fn build_catalogue_ports(config: &ServerConfig) -> CataloguePorts {
    match &config.db_pool {
        Some(pool) => catalogue_ports(
            DieselIdiomRepository::new(pool.clone()),
            DieselCategoryRepository::new(pool.clone()),
        ),
        None => {
            info!("no database configured; catalogue is held in memory");
            catalogue_ports(
                InMemoryIdiomRepository::new(),
                InMemoryCategoryRepository::new(),
            )
        }
    }
}

fn upload_port<H>(host: H) -> Arc<dyn ImageUploads>
where
    H: ImageHost + 'static,
{
    Arc::new(ImageUploadService::new(Arc::new(host)))
}

/// Select the image host backing the upload service.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the imgbb client cannot be constructed.
fn build_upload_port(api_key: Option<&str>) -> std::io::Result<Arc<dyn ImageUploads>> {
    match api_key {
        Some(key) => {
            let endpoint = Url::parse(IMGBB_UPLOAD_URL)
                .map_err(|err| std::io::Error::other(format!("invalid imgbb endpoint: {err}")))?;
            let host = ImgbbImageHost::new(endpoint, key, IMGBB_TIMEOUT)
                .map_err(|err| std::io::Error::other(format!("imgbb client setup failed: {err}")))?;
            Ok(upload_port(host))
        }
        None => {
            info!("no imgbb key configured; uploads return a placeholder URL");
            Ok(upload_port(FixtureImageHost))
        }
    }
}

/// Build the shared HTTP state from the configured adapters.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (idioms, categories) = build_catalogue_ports(config);
    let uploads = build_upload_port(config.imgbb_api_key.as_deref())?;
    Ok(web::Data::new(HttpState::new(idioms, categories, uploads)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chengyu_backend::domain::ports::{ImageFile, PLACEHOLDER_IMAGE_URL};
    use chengyu_backend::domain::{Idiom, NewMajorType, TypeCodeFilter};
    use rstest::rstest;
    use std::net::SocketAddr;

    fn memory_config() -> ServerConfig {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal parses");
        ServerConfig::new(addr)
    }

    #[rstest]
    #[tokio::test]
    async fn missing_pool_selects_in_memory_catalogue() {
        let state = build_http_state(&memory_config()).expect("state builds");

        state
            .idioms
            .upsert_idiom(Idiom::new("一马当先"))
            .await
            .expect("upsert succeeds");
        state
            .categories
            .create_major_type(NewMajorType {
                type_code: "DW".to_owned(),
                type_name: "动物".to_owned(),
                description: None,
            })
            .await
            .expect("create succeeds");

        assert_eq!(state.idioms.list_idioms().await.expect("listed").len(), 1);
        assert_eq!(
            state
                .categories
                .list_major_types(TypeCodeFilter::All)
                .await
                .expect("listed")
                .len(),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_key_selects_placeholder_host() {
        let uploads = build_upload_port(None).expect("port builds");
        let stored = uploads
            .upload_image(
                None,
                ImageFile {
                    file_name: "a.png".to_owned(),
                    content_type: "image/png".to_owned(),
                    bytes: vec![1, 2, 3],
                },
            )
            .await
            .expect("stub accepts");
        assert_eq!(stored.url, PLACEHOLDER_IMAGE_URL);
    }

    #[rstest]
    fn configured_key_builds_imgbb_client() {
        assert!(build_upload_port(Some("key")).is_ok());
    }
}
