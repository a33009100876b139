//! アプリケーション状態
//!
//! 画面ごとの状態を1つにまとめる。非同期要求は発行時に `Ticket` を受け取り、
//! 完了時に最新の発行分でなければ結果を捨てる（後から発行した要求が勝つ）。

use crate::search::SearchState;
use crate::selection::SaveState;
use crate::warehouse::WarehouseState;

/// 要求1件の整理券
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// 整理券の発行機
#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
    issued: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// 最後に発行した整理券か
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// 画面全体の状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search: SearchState,
    pub warehouse: WarehouseState,
    pub save: SaveState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
