#![forbid(unsafe_code)]

//! Headless navigation replay.
//!
//! Drives a [`TransitionOrchestrator`] through a scripted list of routes on a
//! fixed-step [`FrameClock`], writing one record per navigation, per frame
//! and per lifecycle step. Text output is meant for eyeballing timings; JSON
//! output is one object per line for tooling.

use std::io::Write;
use std::time::Duration;

use folio_core::nav::NavLinks;
use folio_core::route::RouteId;
use folio_runtime::{
    DecorationFrame, FolioConfig, FrameClock, LayerKind, RouteSignal, SyncOutcome,
    TransitionOrchestrator,
};
use serde_json::json;
use tracing::info;

use crate::error::{Result, SiteError};
use crate::header::HeaderView;

/// Record encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// What to replay.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Routes to visit in order. Empty means every navigation link.
    pub routes: Vec<RouteId>,
    /// Time spent on each route before moving on.
    pub hold: Duration,
    pub clock: FrameClock,
    /// Viewport width for the header.
    pub width: u32,
    pub format: OutputFormat,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            hold: Duration::from_millis(1500),
            clock: FrameClock::default(),
            width: 1280,
            format: OutputFormat::Text,
        }
    }
}

/// Totals for a finished replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub navigations: usize,
    pub frames: u64,
    pub lifecycle_events: usize,
    pub final_route: RouteId,
    /// Whether both decorations were at rest on the last frame.
    pub settled: bool,
}

/// Run `options` against `config`, writing records to `out`.
pub fn run_replay(
    config: &FolioConfig,
    options: &ReplayOptions,
    out: &mut impl Write,
) -> Result<ReplaySummary> {
    let links = config.nav_links()?;
    let mut orchestrator = TransitionOrchestrator::new(config)?;
    let mut clock = options.clock;
    let script = script(&links, &options.routes)?;

    let first = script.first().cloned().unwrap_or_else(RouteId::root);
    let signal = RouteSignal::new(first);
    let mut lifecycle_events = 0;

    info!(
        routes = script.len(),
        hold_ms = u64::try_from(options.hold.as_millis()).unwrap_or(u64::MAX),
        step_us = u64::try_from(clock.step().as_micros()).unwrap_or(u64::MAX),
        "replay.start"
    );

    for route in &script {
        signal.navigate(route.clone());
        let outcome = orchestrator.sync(&signal);
        let header = HeaderView::new(&links, &signal.current(), options.width);
        write_navigation(out, options.format, &signal, &header, &outcome)?;

        for _ in 0..clock.frames_for(options.hold) {
            orchestrator.tick(clock.advance());
            write_frame(out, options.format, clock.frame(), &orchestrator.frame())?;
            for (decoration, event) in orchestrator.drain_journal() {
                lifecycle_events += 1;
                match options.format {
                    OutputFormat::Json => writeln!(
                        out,
                        "{}",
                        json!({
                            "type": "lifecycle",
                            "decoration": decoration,
                            "instance": event.instance,
                            "key": event.key,
                            "kind": event.kind,
                            "at_secs": event.at.as_secs_f64(),
                        })
                    )?,
                    OutputFormat::Text => writeln!(
                        out,
                        "  . {decoration} {} {} {:?} @{:.3}s",
                        event.instance,
                        event.key,
                        event.kind,
                        event.at.as_secs_f64()
                    )?,
                }
            }
        }
    }

    let summary = ReplaySummary {
        navigations: script.len(),
        frames: clock.frame(),
        lifecycle_events,
        final_route: signal.current(),
        settled: orchestrator.is_idle(),
    };
    info!(
        frames = summary.frames,
        settled = summary.settled,
        "replay.finish"
    );
    Ok(summary)
}

fn script(links: &NavLinks, routes: &[RouteId]) -> Result<Vec<RouteId>> {
    if routes.is_empty() {
        return Ok(links.links().iter().map(|l| l.path.clone()).collect());
    }
    if let Some(bad) = routes.iter().find(|r| !r.as_str().starts_with('/')) {
        return Err(SiteError::invalid(format!(
            "route {bad} must start with '/'"
        )));
    }
    Ok(routes.to_vec())
}

fn write_navigation(
    out: &mut impl Write,
    format: OutputFormat,
    signal: &RouteSignal,
    header: &HeaderView,
    outcome: &SyncOutcome,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let record = json!({
                "type": "navigate",
                "route": signal.current(),
                "version": signal.version(),
                "header": serde_json::to_value(header)?,
                "fade": format!("{:?}", outcome.fade),
                "stairs": format!("{:?}", outcome.stairs),
            });
            writeln!(out, "{record}")?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "-> {} (v{})  fade={:?} stairs={:?}",
                signal.current(),
                signal.version(),
                outcome.fade,
                outcome.stairs
            )?;
            writeln!(out, "   {header}")?;
        }
    }
    Ok(())
}

fn write_frame(
    out: &mut impl Write,
    format: OutputFormat,
    frame_no: u64,
    frame: &DecorationFrame,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let mut record = serde_json::to_value(frame)?;
            if let Some(obj) = record.as_object_mut() {
                obj.insert("type".into(), json!("frame"));
                obj.insert("frame".into(), json!(frame_no));
            }
            writeln!(out, "{record}")?;
        }
        OutputFormat::Text => writeln!(out, "{}", describe(frame_no, frame))?,
    }
    Ok(())
}

/// Compact one-line summary of a frame.
#[must_use]
pub fn describe(frame_no: u64, frame: &DecorationFrame) -> String {
    let mut line = format!("{frame_no:>5} {:>7.3}s", frame.at_secs);
    for layer in frame.layers() {
        let part = match layer.kind {
            LayerKind::FadeOverlay => format!("  fade{} {:.2}", layer.instance, layer.opacity),
            LayerKind::StairUnderlay => format!("  under{} {:.2}", layer.instance, layer.opacity),
            LayerKind::StairPanels => {
                let tops: Vec<String> = layer
                    .panels
                    .iter()
                    .map(|p| format!("{:.0}", p.top_percent))
                    .collect();
                format!("  stairs{} [{}]", layer.instance, tops.join(" "))
            }
        };
        line.push_str(&part);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_options(routes: &[&str], format: OutputFormat) -> ReplayOptions {
        ReplayOptions {
            routes: routes.iter().map(|r| RouteId::new(r)).collect(),
            hold: Duration::from_millis(500),
            clock: FrameClock::from_step(Duration::from_millis(100)).unwrap(),
            width: 1280,
            format,
        }
    }

    #[test]
    fn default_script_visits_every_link() {
        let links = NavLinks::site_default();
        let routes = script(&links, &[]).unwrap();
        let paths: Vec<&str> = routes.iter().map(RouteId::as_str).collect();
        assert_eq!(paths, vec!["/", "/services", "/resume", "/work", "/contact"]);
    }

    #[test]
    fn relative_route_rejected() {
        let err = script(&NavLinks::site_default(), &[RouteId::new("work")]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn text_replay_counts_frames() {
        let mut out = Vec::new();
        let summary = run_replay(
            &FolioConfig::default(),
            &fast_options(&["/", "/work"], OutputFormat::Text),
            &mut out,
        )
        .unwrap();
        assert_eq!(summary.navigations, 2);
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.final_route.as_str(), "/work");
        assert!(!summary.settled);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("-> / (v0)"));
        assert!(text.contains("-> /work (v1)"));
        assert!(text.contains("[Work]"));
    }

    #[test]
    fn json_replay_lines_parse() {
        let mut out = Vec::new();
        run_replay(
            &FolioConfig::default(),
            &fast_options(&["/", "/services"], OutputFormat::Json),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let navigations: Vec<&serde_json::Value> =
            records.iter().filter(|r| r["type"] == "navigate").collect();
        assert_eq!(navigations.len(), 2);
        assert_eq!(navigations[1]["route"], "/services");
        assert_eq!(navigations[1]["stairs"], "Deferred");
        assert_eq!(records.iter().filter(|r| r["type"] == "frame").count(), 10);
        // Half a second is too short for anything to finish entering.
        assert!(
            !records
                .iter()
                .any(|r| r["type"] == "lifecycle" && r["kind"] == "enter_completed")
        );
        assert!(
            records
                .iter()
                .any(|r| r["type"] == "lifecycle" && r["kind"] == "mounted" && r["key"] == "/services")
        );
    }

    #[test]
    fn describe_lists_layers_in_paint_order() {
        let mut orch = TransitionOrchestrator::with_defaults().unwrap();
        orch.observe(&RouteId::root());
        let line = describe(0, &orch.frame());
        assert!(line.contains("fade#0 1.00"));
        assert!(line.contains("under#0 1.00"));
        assert!(line.contains("stairs#0 [0 0 0 0 0 0]"));
    }
}
