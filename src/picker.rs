//! 保存対象の選択
//!
//! `--pick 1,3-5` 形式（表示中の通し番号、1始まり）か、対話的な複数選択。

use crate::error::{Result, SearchCliError};
use dialoguer::MultiSelect;
use xiaoyu_common::{RecordId, SearchResult};

/// `1,3-5` を検索結果のIDに変換
pub fn parse_picks(input: &str, results: &[SearchResult]) -> Result<Vec<RecordId>> {
    let mut ids = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (from, to) = match part.split_once('-') {
            Some((a, b)) => (parse_position(a, part)?, parse_position(b, part)?),
            None => {
                let n = parse_position(part, part)?;
                (n, n)
            }
        };
        if from > to {
            return Err(SearchCliError::InvalidPick(part.to_string()));
        }
        for position in from..=to {
            let result = results
                .get(position - 1)
                .ok_or_else(|| SearchCliError::InvalidPick(position.to_string()))?;
            if !ids.contains(&result.id) {
                ids.push(result.id);
            }
        }
    }
    Ok(ids)
}

fn parse_position(text: &str, part: &str) -> Result<usize> {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(SearchCliError::InvalidPick(part.to_string())),
    }
}

/// 対話的に複数選択
pub fn prompt_picks(results: &[SearchResult]) -> Result<Vec<RecordId>> {
    if results.is_empty() {
        return Err(SearchCliError::NoResults);
    }
    let items: Vec<String> = results
        .iter()
        .map(|r| format!("[{}] {}", r.source.badge_label(), r.title))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("选择要保存的结果（空格选择，回车确认）")
        .items(&items)
        .interact()?;

    Ok(chosen.into_iter().map(|i| results[i].id).collect())
}
