use hirearc_core::{Bundle, DocumentId, DocumentKind, StandardizedInfo};
use hirearc_match::{match_pair, Candidate};
use hirearc_pipeline::{Parser, Standardizer};

use crate::cli::GlobalFlags;
use crate::collaborators::{FileParser, HeuristicStandardizer};
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

pub async fn handle(
    ctx: &AppContext,
    flags: &GlobalFlags,
    jd: &str,
    cv: &str,
    weights: Option<Vec<f64>>,
) -> Result<(), HirearcError> {
    let (jd_bundle, jd_info) = resolve_candidate(ctx, jd, DocumentKind::Jd).await?;
    let (cv_bundle, cv_info) = resolve_candidate(ctx, cv, DocumentKind::Cv).await?;

    let raw_weights = match weights {
        Some(w) => {
            let [a, b, c, d] = <[f64; 4]>::try_from(w).map_err(|_| {
                HirearcError::InvalidInput("--weights takes exactly 4 values".to_string())
            })?;
            (a, b, c, d)
        }
        None => ctx.config.matching.weights_default,
    };

    let jd_candidate = Candidate {
        bundle: &jd_bundle,
        info: &jd_info,
    };
    let cv_candidate = Candidate {
        bundle: &cv_bundle,
        info: &cv_info,
    };

    let result = match_pair(&jd_candidate, &cv_candidate, raw_weights)?;
    output::print(flags, &result);
    Ok(())
}

/// `value` is either a stored document's UUID or a filesystem path to an
/// un-persisted document, parsed and standardized ad hoc.
async fn resolve_candidate(
    ctx: &AppContext,
    value: &str,
    kind: DocumentKind,
) -> Result<(Bundle, StandardizedInfo), HirearcError> {
    if let Ok(uuid) = value.parse::<uuid::Uuid>() {
        let id = DocumentId::from_uuid(uuid);
        let store = std::sync::Arc::clone(&ctx.store);
        let (bundle, info) = tokio::task::spawn_blocking(move || {
            let bundle = store.get_bundle(id, kind)?;
            let info = store.get_structured(id, kind)?;
            Ok::<_, hirearc_store::StoreError>((bundle, info))
        })
        .await
        .expect("store lookup task panicked")?;
        return Ok((bundle, info));
    }

    let parsed = FileParser.parse(value).await?;
    let info = HeuristicStandardizer
        .standardize(&parsed.clean_text, value, kind)
        .await?;

    let embed = std::sync::Arc::clone(&ctx.embed);
    let info_for_embed = info.clone();
    let bundle = tokio::task::spawn_blocking(move || embed.embed_document(&info_for_embed))
        .await
        .expect("embedding task panicked")?;

    Ok((bundle, info))
}
