//! 端末への表示

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use xiaoyu_common::render::{EMPTY_DATA, EMPTY_RESULTS, LOADING, UNTITLED};
use xiaoyu_common::{
    Alert, AlertKind, DataRow, PageAction, SearchResult, SearchState, WarehouseState,
};

/// 読み込み中のスピナー
pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(LOADING);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_alert(alert: &Alert) {
    match alert.kind {
        AlertKind::Success => println!("✔ {}", alert.message),
        AlertKind::Info => println!("ℹ {}", alert.message),
        AlertKind::Warning => eprintln!("⚠ {}", alert.message),
        AlertKind::Error => eprintln!("✖ {}", alert.message),
    }
}

fn title_of(result: &SearchResult) -> &str {
    if result.title.is_empty() {
        UNTITLED
    } else {
        result.title.as_str()
    }
}

/// 現在ページの検索結果
pub fn print_results(state: &SearchState) {
    if state.results().is_empty() {
        println!("{}", EMPTY_RESULTS);
        return;
    }

    let offset = (state.current_page() - 1) * xiaoyu_common::ITEMS_PER_PAGE;
    for (i, result) in state.page_results().iter().enumerate() {
        println!("{:>3}. [{}] {}", offset + i + 1, result.source.badge_label(), title_of(result));
        if let Some(url) = &result.url {
            println!("     {}", url);
        }
        for line in result.summary.lines().filter(|l| !l.trim().is_empty()) {
            println!("     {}", line);
        }
        println!("     来源: {}", result.source.badge_label());
    }

    if let Some(view) = state.pagination() {
        let bar: Vec<String> = view
            .buttons
            .iter()
            .map(|b| match b.action {
                PageAction::Goto(_) if b.active => format!("[{}]", b.label),
                _ if b.disabled => format!("({})", b.label),
                _ => b.label.clone(),
            })
            .collect();
        println!("\n{}  (共 {} 页)", bar.join(" "), view.total_pages);
    }
}

fn print_row(row: &DataRow) {
    println!("{:>3}. {}", row.index + 1, row.title);
    if let Some(url) = &row.url {
        println!("     {}", url);
    }
    println!("     关键词：{}  日期：{}  来源：{}", row.keyword, row.date, row.source);
    println!("     {}", row.content.replace('\n', " "));
}

/// データ倉庫の一覧
pub fn print_warehouse(state: &WarehouseState) {
    if let Some(label) = state.stats_label() {
        println!("{}", label);
    }
    let rows = state.rows();
    if rows.is_empty() {
        println!("{}", EMPTY_DATA);
        return;
    }
    for row in &rows {
        print_row(row);
    }
}
