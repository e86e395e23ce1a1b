use std::fmt::Write;

use learnify_core::model::Doubt;
use learnify_core::scoring::CourseReport;
use services::{CatalogueEntry, CourseOverview, DashboardOverview};

/// Plain-text rendering of a dashboard overview for the terminal.
#[must_use]
pub fn render_overview(overview: &DashboardOverview) -> String {
    let mut out = String::new();
    let learner = &overview.learner;

    let _ = writeln!(out, "{}", overview.greeting);
    let _ = writeln!(
        out,
        "Grade: {} | Board: {} | Total courses: {}",
        learner.grade, learner.board, overview.total_courses
    );
    let _ = writeln!(out);

    if overview.is_empty() {
        let _ = writeln!(out, "🚀 You haven't requested any courses yet.");
        return out;
    }

    let _ = writeln!(out, "{}", overview.heading);
    for course in &overview.courses {
        render_course(&mut out, course);
    }
    out
}

fn render_course(out: &mut String, course: &CourseOverview) {
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ({}/{} modules, {}%)",
        course.title, course.completed_modules, course.expected_modules, course.completion_percent
    );

    if let Some(report) = &course.report {
        render_report(out, report);
        return;
    }

    for module in &course.modules {
        let _ = writeln!(out, "  🧠 {}", module.title);
        if module.games.is_empty() {
            let _ = writeln!(out, "     No games played yet.");
        }
        for game in &module.games {
            let _ = writeln!(
                out,
                "     🎮 {}: {} / {} ({})",
                game.game_title,
                game.score,
                game.total,
                game.timestamp.format("%b %-d, %Y %H:%M")
            );
        }
    }
}

fn render_report(out: &mut String, report: &CourseReport) {
    let _ = writeln!(
        out,
        "  📊 Final Score: {}% {} [{}]",
        report.score,
        report.emoji.as_str(),
        report.color.as_str()
    );
    let _ = writeln!(out, "  {}", report.feedback.as_str());
    if report.review.is_empty() {
        return;
    }
    let _ = writeln!(out, "  🧐 Recommended for Review:");
    for module in &report.review {
        let _ = writeln!(out, "    🔁 {}: {}%", module.title, module.score);
    }
}

/// Course catalogue, one course per line.
#[must_use]
pub fn render_catalogue(entries: &[CatalogueEntry]) -> String {
    if entries.is_empty() {
        return "No courses yet.\n".to_owned();
    }
    let mut out = String::new();
    for entry in entries {
        let course = &entry.course;
        let mark = if entry.completed { "✅" } else { "📘" };
        let _ = writeln!(
            out,
            "{mark} {} [{}] {} | Grade {}",
            course.title, course.id, course.subject, course.grade
        );
    }
    out
}

/// Past doubts with their answers.
#[must_use]
pub fn render_doubts(doubts: &[Doubt]) -> String {
    if doubts.is_empty() {
        return "No doubts found.\n".to_owned();
    }
    let mut out = String::new();
    for doubt in doubts {
        if let Some(asked_at) = doubt.asked_at {
            let _ = writeln!(out, "Asked on: {}", asked_at.format("%b %-d, %Y %H:%M"));
        }
        let _ = writeln!(out, "❓ {}", doubt.question);
        let _ = writeln!(out, "🤖 {}", doubt.answer);
        let _ = writeln!(out);
    }
    out
}
