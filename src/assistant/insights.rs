//! Local insights responder.
//!
//! DESIGN
//! ======
//! Answers from the bundled datasets by keyword when no external endpoint is
//! configured. Keywords are checked in a fixed order (top, worst, average,
//! compare, district) and the first hit wins, so "top district" is answered
//! as a top-performer question.

use std::fmt::Write;
use std::sync::Arc;

use super::types::{Answer, AnswerService, AssistantError, Question};
use crate::dataset::{Catalog, Dataset};
use crate::metrics::{aggregate, compare_periods, group_by_district, rank_districts, top_performer, worst_performer};

#[cfg(test)]
#[path = "insights_test.rs"]
mod insights_test;

pub struct InsightsResponder {
    catalog: Arc<Catalog>,
}

impl InsightsResponder {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait::async_trait]
impl AnswerService for InsightsResponder {
    fn name(&self) -> &'static str {
        "insights"
    }

    async fn answer(&self, question: &Question) -> Result<Answer, AssistantError> {
        let text = match self.catalog.get(question.dataset) {
            Some(dataset) => respond(&question.text, dataset),
            None => format!("The {} dataset is not loaded.", question.dataset.topic()),
        };
        Ok(Answer::complete(text))
    }
}

/// Build a reply for `query` from `dataset`.
#[must_use]
pub fn respond(query: &str, dataset: &Dataset) -> String {
    let topic = dataset.key.topic();
    if dataset.records.is_empty() {
        return format!("There are no blocks in the {topic} dataset yet.");
    }

    let q = query.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if has(&["top", "best", "highest"]) {
        top_answer(dataset)
    } else if has(&["worst", "lowest", "bottom"]) {
        worst_answer(dataset)
    } else if has(&["average", "mean"]) {
        average_answer(dataset)
    } else if has(&["compare", "difference", "year"]) {
        comparison_answer(dataset)
    } else if has(&["district"]) {
        district_answer(dataset)
    } else {
        help_answer(dataset)
    }
}

fn signed_pct(v: f64) -> String {
    if v >= 0.0 { format!("+{v:.1}%") } else { format!("{v:.1}%") }
}

/// Like `signed_pct`, but a zero change carries no sign.
fn strictly_signed_pct(v: f64) -> String {
    if v > 0.0 { format!("+{v:.1}%") } else { format!("{v:.1}%") }
}

fn top_answer(dataset: &Dataset) -> String {
    let Some(top) = top_performer(&dataset.records) else {
        return String::new();
    };
    format!(
        "Top Performer: {} in {} district leads with {:.1}% achievement in March 2025.\n\n\
         Improvement: {} from March 2024\n\
         Rank: #{} (was #{} in 2024)\n\
         Score: {}% absolute score",
        top.block,
        top.district,
        top.achievement_current,
        strictly_signed_pct(top.improvement()),
        top.rank_current,
        top.rank_prior,
        top.score_current,
    )
}

fn worst_answer(dataset: &Dataset) -> String {
    let Some(worst) = worst_performer(&dataset.records) else {
        return String::new();
    };
    format!(
        "Needs Attention: {} in {} district has the lowest achievement at {:.1}% in March 2025.\n\n\
         Change: {} from March 2024\n\
         Current Rank: #{}\n\
         Recommendation: This block may need additional support and resources.",
        worst.block,
        worst.district,
        worst.achievement_current,
        signed_pct(worst.improvement()),
        worst.rank_current,
    )
}

fn average_answer(dataset: &Dataset) -> String {
    let current = aggregate::mean_of(&dataset.records, |r| r.achievement_current);
    let prior = aggregate::mean_of(&dataset.records, |r| r.achievement_prior);
    let change = current - prior;
    let trend = if change >= 0.0 {
        "Positive trend across the region!"
    } else {
        "Declining trend - intervention may be needed."
    };
    format!(
        "Average Performance for {}:\n\n\
         March 2025: {current:.1}%\n\
         March 2024: {prior:.1}%\n\
         Overall Change: {}\n\n\
         {trend}",
        dataset.key.topic(),
        signed_pct(change),
    )
}

fn comparison_answer(dataset: &Dataset) -> String {
    let cmp = compare_periods(&dataset.records);
    let insight = if cmp.improved > cmp.declined {
        "More blocks are improving than declining - positive overall trend!"
    } else {
        "More attention needed as declines outweigh improvements."
    };
    format!(
        "Year-over-Year Comparison (Mar 2024 vs Mar 2025):\n\n\
         Improved: {} blocks ({:.1}%)\n\
         Declined: {} blocks ({:.1}%)\n\
         Stable: {} blocks ({:.1}%)\n\n\
         Key Insight: {insight}",
        cmp.improved,
        cmp.improved_pct(),
        cmp.declined,
        cmp.declined_pct(),
        cmp.stable,
        cmp.stable_pct(),
    )
}

fn district_answer(dataset: &Dataset) -> String {
    let ranked = rank_districts(&dataset.records);
    let mut out = String::from("District Performance Overview:\n\n");
    for (i, d) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {:.1}% avg ({} blocks)", i + 1, d.district, d.mean_achievement, d.count);
    }
    if let Some(best) = ranked.first() {
        let _ = write!(out, "\nBest District: {}\n", best.district);
    }
    let _ = write!(out, "Total Districts: {}", ranked.len());
    out
}

fn help_answer(dataset: &Dataset) -> String {
    let districts = group_by_district(&dataset.records).len();
    format!(
        "I'm analyzing the {} data for you. Here are some questions you can ask:\n\n\
         Try asking about:\n\
         - \"Show me the top performing blocks\"\n\
         - \"What's the average achievement?\"\n\
         - \"Compare performance between years\"\n\
         - \"Which districts are doing best?\"\n\
         - \"Show me the worst performing areas\"\n\n\
         Current Dataset: {} blocks across {districts} districts\n\n\
         What would you like to know?",
        dataset.key.topic(),
        dataset.records.len(),
    )
}
