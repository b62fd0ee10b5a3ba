use std::path::PathBuf;
use std::sync::Arc;

use font_compare::services::upload_service;
use font_compare::{
    FontCatalog, FontDescriptor, FontLoadCache, FontLoadService, FontdbRegistry, LoadRequest,
    SelectionController, Settings,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings_path = PathBuf::from(font_compare::config::SETTINGS_FILE_NAME);
    let settings = Settings::load(&settings_path);

    let mut controller = SelectionController::new(FontCatalog::bundled(), &settings);

    // Font files passed on the command line are ingested as uploads.
    let upload_paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let mut uploaded: Vec<FontDescriptor> = Vec::new();
    if !upload_paths.is_empty() {
        match upload_service::process_uploads(&upload_paths) {
            Ok(descriptors) => {
                uploaded = descriptors.clone();
                controller.append_to_catalog(descriptors)?;
            }
            Err(e) => log::warn!("Upload ingestion failed: {}", e),
        }
    }

    let registry = Arc::new(FontdbRegistry::new());
    let service = FontLoadService::new(Arc::new(FontLoadCache::new()), registry.clone());

    let requests = controller.initial_requests();
    async_std::task::block_on(load_previews(&service, &controller, &uploaded, requests));

    log::info!("Active font set holds {} face(s)", registry.face_count());

    controller.snapshot().save(&settings_path)?;
    Ok(())
}

/// Preloads uploaded families, then brings both preview selections up.
async fn load_previews(
    service: &FontLoadService<FontdbRegistry>,
    controller: &SelectionController,
    uploaded: &[FontDescriptor],
    requests: Vec<LoadRequest>,
) {
    for descriptor in uploaded {
        let results = service.preload(descriptor).await;
        let loaded = results.iter().filter(|ok| **ok).count();
        log::info!(
            "Preloaded {}: {}/{} variant(s)",
            descriptor.family,
            loaded,
            results.len()
        );
    }

    for request in requests {
        let Some(descriptor) = controller.catalog().get(&request.font_id) else {
            continue;
        };
        if service
            .ensure_loaded(descriptor, request.weight, request.style)
            .await
        {
            log::info!(
                "Preview ready: {} {} {}",
                descriptor.family,
                request.weight,
                request.style
            );
        } else {
            log::warn!(
                "Preview for {} falls back to a generic family",
                descriptor.family
            );
        }
    }
}
