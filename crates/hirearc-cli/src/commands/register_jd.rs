use hirearc_core::{DocumentId, DocumentKind, StandardizedInfo};
use hirearc_pipeline::{Parser, Standardizer};

use crate::cli::GlobalFlags;
use crate::collaborators::{FileParser, HeuristicStandardizer};
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

#[derive(serde::Serialize)]
struct RegisterJdResponse {
    jd_id: DocumentId,
}

/// Parses and standardizes `jd_file`, persists it as a JD document/bundle,
/// and registers `jd_token` against it so `submit` can resolve applications.
pub async fn handle(
    ctx: &AppContext,
    flags: &GlobalFlags,
    jd_token: String,
    jd_file: String,
    accepting: bool,
) -> Result<(), HirearcError> {
    let jd_id = DocumentId::new();

    let parsed = FileParser.parse(&jd_file).await?;
    let info: StandardizedInfo = HeuristicStandardizer
        .standardize(&parsed.clean_text, &jd_file, DocumentKind::Jd)
        .await?;

    let embed = std::sync::Arc::clone(&ctx.embed);
    let info_for_embed = info.clone();
    let bundle = tokio::task::spawn_blocking(move || embed.embed_document(&info_for_embed))
        .await
        .expect("embedding task panicked")?;

    let store = std::sync::Arc::clone(&ctx.store);
    let record = hirearc_store::DocumentRecord {
        filename: jd_file.clone(),
        format: parsed.format,
        raw_text: parsed.raw_text,
        uploaded_at: chrono::Utc::now(),
        file_uri: Some(jd_file),
        mime: None,
    };
    tokio::task::spawn_blocking(move || -> Result<(), hirearc_store::StoreError> {
        store.put_document(jd_id, DocumentKind::Jd, &record)?;
        store.put_structured(jd_id, DocumentKind::Jd, &info)?;
        store.put_bundle(jd_id, DocumentKind::Jd, &bundle)?;
        Ok(())
    })
    .await
    .expect("persist task panicked")?;

    ctx.metadata.register(jd_token, jd_id, accepting);

    output::print(flags, &RegisterJdResponse { jd_id });
    Ok(())
}
