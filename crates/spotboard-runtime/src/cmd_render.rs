//! `spotboard render`: one fetch-classify-render pass, then exit.

use anyhow::Context;

use spotboard_core::{ClassifiedTable, PageOptions, classify, render_document, render_table};
use spotboard_feed::{AnyFeed, FeedSource};

use crate::cli::{RenderFormat, RenderOpts};
use crate::sink::open_sink;

/// Markup for one classified table in the requested format.
pub(crate) fn render_markup(
    table: &ClassifiedTable,
    format: RenderFormat,
    page: bool,
) -> anyhow::Result<String> {
    match format {
        RenderFormat::Json => {
            let mut json = serde_json::to_string_pretty(table)?;
            json.push('\n');
            Ok(json)
        }
        RenderFormat::Html if page => Ok(render_document(table, None, &PageOptions::default())),
        RenderFormat::Html => Ok(render_table(table, None)),
    }
}

/// Entry point for `spotboard render`.
pub async fn cmd_render(opts: RenderOpts) -> anyhow::Result<()> {
    let feed = AnyFeed::open(&opts.feed.feed, opts.feed.fetch_timeout())?;
    let text = feed
        .fetch()
        .await
        .with_context(|| format!("fetching {}", feed.describe()))?;
    let table = classify(&text).with_context(|| format!("classifying {}", feed.describe()))?;

    let markup = render_markup(&table, opts.format, opts.output.page)?;
    let sink = open_sink(opts.output.output.as_deref());
    sink.replace(&markup)
        .with_context(|| format!("updating {}", sink.describe()))?;

    tracing::debug!("rendered {} spots to {}", table.rows.len(), sink.describe());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FeedArgs, OutputArgs};
    use spotboard_feed::FeedLocation;

    const FEED: &str = "10-19-2026,1430,GMT,SPOT\nQP CALL,C&IC,AGE,AGE\nK4A,FAI,10,45\nW4B,ROA,200,200\n";

    fn opts(dir: &std::path::Path, format: RenderFormat, page: bool) -> RenderOpts {
        let feed_path = dir.join("table.csv");
        std::fs::write(&feed_path, FEED).expect("write feed");
        RenderOpts {
            feed: FeedArgs {
                feed: FeedLocation::File(feed_path),
                fetch_timeout_ms: None,
            },
            output: OutputArgs {
                output: Some(dir.join("spots.out")),
                page,
            },
            format,
        }
    }

    fn output(dir: &std::path::Path) -> String {
        std::fs::read_to_string(dir.join("spots.out")).expect("read output")
    }

    #[tokio::test]
    async fn renders_html_table_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        cmd_render(opts(dir.path(), RenderFormat::Html, false))
            .await
            .expect("render");

        let markup = output(dir.path());
        assert!(markup.starts_with("<table>\n"));
        assert!(markup.contains("<td>K4A</td>"));
        assert!(markup.contains("background-color: lightgreen"));
        assert!(markup.contains("background-color: red"));
        assert_eq!(markup.lines().filter(|l| l.starts_with("<tr")).count(), 4);
    }

    #[tokio::test]
    async fn renders_standalone_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        cmd_render(opts(dir.path(), RenderFormat::Html, true))
            .await
            .expect("render");

        let page = output(dir.path());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div id=\"t1\">"));
        assert!(!page.contains("http-equiv"));
    }

    #[tokio::test]
    async fn renders_json_classification() {
        let dir = tempfile::tempdir().expect("tempdir");
        cmd_render(opts(dir.path(), RenderFormat::Json, false))
            .await
            .expect("render");

        let json: serde_json::Value = serde_json::from_str(&output(dir.path())).expect("json");
        let rows = json["rows"].as_array().expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["call"], "K4A");
        assert_eq!(rows[0]["band"], "fresh");
        assert_eq!(rows[0]["emphasized"], true);
        assert_eq!(rows[1]["band"], "very_stale");
    }

    #[tokio::test]
    async fn missing_feed_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut opts = opts(dir.path(), RenderFormat::Html, false);
        opts.feed.feed = FeedLocation::File(dir.path().join("absent.csv"));

        let err = cmd_render(opts).await.expect_err("should fail");
        assert!(format!("{err:#}").contains("absent.csv"));
        assert!(!dir.path().join("spots.out").exists());
    }

    #[tokio::test]
    async fn malformed_feed_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let opts = opts(dir.path(), RenderFormat::Html, false);
        std::fs::write(dir.path().join("table.csv"), "only,three,fields\n").expect("write");

        assert!(cmd_render(opts).await.is_err());
        assert!(!dir.path().join("spots.out").exists());
    }
}
