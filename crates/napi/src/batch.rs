//! `compileBatch`: many documents compiled on a rayon pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use docblocks_mdx::{DocumentOptions, compile_document};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use rayon::prelude::*;

use crate::document_options;
use crate::types::{CompileResult, CompilerConfig};

/// One page to compile.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchDocument {
    /// Caller's key for the page, echoed back in its entry.
    pub id: String,
    /// Page source.
    pub source: String,
}

/// Outcome for one page: `output` or `error`, never both.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Key of the page.
    pub id: String,
    /// Compiled page.
    pub output: Option<CompileResult>,
    /// Failure message.
    pub error: Option<String>,
}

/// Batch settings.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; rayon picks one per core when absent.
    pub threads: Option<u32>,
    /// Drop every page after the first failure (in input order).
    pub stop_on_error: Option<bool>,
    /// Shared compiler settings.
    pub config: Option<CompilerConfig>,
}

/// Entries in input order plus counts.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Entries in input order, cut after the first failure with `stopOnError`.
    pub entries: Vec<BatchEntry>,
    /// Pages compiled.
    pub compiled: u32,
    /// Pages that failed.
    pub failed: u32,
    /// Pages left out by `stopOnError`.
    pub skipped: u32,
    /// Wall time in milliseconds.
    pub elapsed_ms: f64,
}

/// Compiles pages in parallel.
///
/// ```javascript
/// const { entries, failed } = compileBatch(
///   pages.map((p) => ({ id: p.path, source: p.text })),
///   { threads: 4 },
/// );
/// ```
#[napi(js_name = "compileBatch")]
pub fn compile_batch(
    documents: Vec<BatchDocument>,
    options: Option<BatchOptions>,
) -> napi::Result<BatchSummary> {
    let started = Instant::now();
    let options = options.unwrap_or_default();
    let stop_on_error = options.stop_on_error.unwrap_or(false);
    let doc_options = document_options(options.config)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0) as usize)
        .build()
        .map_err(|e| Error::from_reason(format!("Cannot start batch thread pool: {}", e)))?;

    let total = documents.len();
    // Lowest input index that failed so far; later pages are not worth
    // compiling once `stop_on_error` will cut them.
    let first_failure = AtomicUsize::new(usize::MAX);

    let outcomes: Vec<Option<BatchEntry>> = pool.install(|| {
        documents
            .into_par_iter()
            .enumerate()
            .map(|(index, doc)| {
                if stop_on_error && index > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                let entry = compile_entry(doc, &doc_options);
                if entry.error.is_some() {
                    first_failure.fetch_min(index, Ordering::Relaxed);
                }
                Some(entry)
            })
            .collect()
    });

    let keep = if stop_on_error {
        first_failure.into_inner().saturating_add(1)
    } else {
        total
    };
    let entries: Vec<BatchEntry> = outcomes.into_iter().take(keep).flatten().collect();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();

    Ok(BatchSummary {
        compiled: (entries.len() - failed) as u32,
        failed: failed as u32,
        skipped: (total - entries.len()) as u32,
        entries,
        elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
    })
}

fn compile_entry(doc: BatchDocument, options: &DocumentOptions) -> BatchEntry {
    let (output, error) = match compile_document(&doc.source, options) {
        Ok(out) => (Some(CompileResult::from(out)), None),
        Err(e) => (None, Some(e.to_string())),
    };
    BatchEntry {
        id: doc.id,
        output,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<BatchDocument> {
        [
            ("ok.mdx", ":::success\nDone.\n:::"),
            ("bad.mdx", "<Alert context=\"loud\">\n\nx\n\n</Alert>"),
            ("tabs.mdx", "<Tabs>\n\n<Tab title=\"A\">\n\n1\n\n</Tab>\n\n</Tabs>"),
        ]
        .into_iter()
        .map(|(id, source)| BatchDocument {
            id: id.into(),
            source: source.into(),
        })
        .collect()
    }

    #[test]
    fn failures_do_not_stop_the_batch_by_default() {
        let summary = compile_batch(
            pages(),
            Some(BatchOptions {
                threads: Some(2),
                ..Default::default()
            }),
        )
        .unwrap();
        let ids: Vec<&str> = summary.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["ok.mdx", "bad.mdx", "tabs.mdx"]);
        assert_eq!((summary.compiled, summary.failed, summary.skipped), (2, 1, 0));
        assert!(summary.entries[1].error.as_deref().unwrap().contains("loud"));
        assert_eq!(summary.entries[2].output.as_ref().unwrap().tab_groups, 1);
    }

    #[test]
    fn stop_on_error_cuts_after_first_failure() {
        let summary = compile_batch(
            pages(),
            Some(BatchOptions {
                stop_on_error: Some(true),
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.entries[1].id, "bad.mdx");
        assert_eq!((summary.compiled, summary.failed, summary.skipped), (1, 1, 1));
    }

    #[test]
    fn stop_on_error_without_failures_keeps_everything() {
        let mut docs = pages();
        docs.remove(1);
        let summary = compile_batch(
            docs,
            Some(BatchOptions {
                stop_on_error: Some(true),
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!((summary.compiled, summary.failed, summary.skipped), (2, 0, 0));
    }

    #[test]
    fn empty_batch() {
        let summary = compile_batch(Vec::new(), None).unwrap();
        assert!(summary.entries.is_empty());
        assert_eq!(summary.skipped, 0);
    }
}
