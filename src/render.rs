//! Stateless rendering of a [`SessionState`] snapshot.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

use crate::cli_style::{
    colors, pad_to_width, write_empty_note, write_key_value, write_list_item, write_panel_footer,
    write_panel_header, write_section_title,
};
use crate::search::{youtube_embed_url, Metrics, ResultOrigin, SearchResult, Track};
use crate::session::SessionState;

pub fn render_session<W: Write>(out: &mut W, state: &SessionState) -> io::Result<()> {
    write_selection(out, state)?;

    if state.is_loading {
        writeln!(out, "{}", "Searching...".with(colors::DIM))?;
    }

    if let Some(error) = &state.error {
        writeln!(out, "{}", error.as_str().with(colors::RED).bold())?;
    }

    if !state.has_results() || state.is_loading {
        return Ok(());
    }

    if let Some(result) = &state.result1 {
        let title = if state.comparison_mode {
            format!("{} Results", state.algorithm1.label())
        } else {
            format!("{} ({})", state.algorithm1.label(), state.last_query)
        };
        write_result_panel(out, &title, colors::BLUE, result)?;
    }

    if state.comparison_mode {
        let title = format!("{} Results", state.algorithm2.label());
        match &state.result2 {
            Some(result) => write_result_panel(out, &title, colors::PURPLE, result)?,
            None => {
                write_panel_header(out, &title, colors::PURPLE)?;
                write_empty_note(
                    out,
                    &format!(
                        "Perform a search to see {} results",
                        state.algorithm2.label()
                    ),
                )?;
                write_panel_footer(out, colors::PURPLE)?;
            }
        }
    }
    Ok(())
}

fn write_selection<W: Write>(out: &mut W, state: &SessionState) -> io::Result<()> {
    let mode = if state.comparison_mode {
        "Comparison Mode"
    } else {
        "Single View"
    };
    let mut line = format!("[{}] algorithm: {}", mode, state.algorithm1);
    if state.comparison_mode {
        line.push_str(&format!(" vs {}", state.algorithm2));
    }
    line.push_str(&format!(", k = {}", state.k));
    writeln!(out, "{}", line.with(colors::DIM))
}

fn write_result_panel<W: Write>(
    out: &mut W,
    title: &str,
    color: Color,
    result: &SearchResult,
) -> io::Result<()> {
    write_panel_header(out, title, color)?;

    if result.origin == ResultOrigin::Fallback {
        writeln!(
            out,
            "{}",
            "  Scoring service unavailable, showing offline results".with(colors::ORANGE)
        )?;
    }

    if let Some(metrics) = &result.metrics {
        write_metrics(out, metrics, result.origin)?;
    }

    if let Some(query_track) = &result.query_track {
        write_section_title(out, "Query Track")?;
        write_track(out, None, query_track)?;
    }

    write_section_title(
        out,
        &format!("Retrieved Tracks ({})", result.retrieved_tracks.len()),
    )?;
    if result.retrieved_tracks.is_empty() {
        write_empty_note(out, "No tracks returned")?;
    }
    for (index, track) in result.retrieved_tracks.iter().enumerate() {
        write_track(out, Some(index + 1), track)?;
    }

    write_panel_footer(out, color)
}

fn write_metrics<W: Write>(out: &mut W, metrics: &Metrics, origin: ResultOrigin) -> io::Result<()> {
    let title = if origin.is_synthesized() {
        "Metrics"
    } else {
        "Metrics (estimated)"
    };
    write_section_title(out, title)?;
    write_key_value(out, "Precision@k", &format!("{:.3}", metrics.precision_at_k))?;
    write_key_value(out, "Recall@k", &format!("{:.3}", metrics.recall_at_k))?;
    write_key_value(out, "MRR@k", &format!("{:.3}", metrics.mrr_at_k))?;
    write_key_value(out, "nDCG@k", &format!("{:.3}", metrics.ndcg_at_k))?;
    write_key_value(
        out,
        "Coverage@k",
        &format!("{:.1}%", metrics.coverage_at_k * 100.0),
    )?;
    write_key_value(out, "Popularity@k", &format!("{:.1}", metrics.pop_at_k))
}

fn write_track<W: Write>(out: &mut W, rank: Option<usize>, track: &Track) -> io::Result<()> {
    let rank = rank.map(|r| format!("{:>2}.", r)).unwrap_or_default();
    let similarity = track
        .similarity
        .map(|s| format!(" [{:.3}]", s))
        .unwrap_or_default();
    let headline = format!(
        "{} {} - {}{}",
        rank,
        pad_to_width(&track.artist, 18),
        track.track,
        similarity
    );

    let mut detail = track.album.clone();
    if !track.youtube_url.is_empty() {
        detail.push_str("  ");
        detail.push_str(&youtube_embed_url(&track.youtube_url));
    }
    write_list_item(out, headline.trim_start(), &detail)
}
