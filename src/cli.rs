use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xiaoyu")]
#[command(about = "小鱼智能数据分析处理系统 - 搜索与数据仓库客户端", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// キーワード検索
    Search {
        /// 検索キーワード
        #[arg(required = true)]
        keyword: String,

        /// 表示するページ
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// 検索して結果をデータ倉庫に保存
    Save {
        /// 検索キーワード
        #[arg(required = true)]
        keyword: String,

        /// 保存する結果の番号（例: 1,3-5）。省略時は対話選択
        #[arg(short, long)]
        pick: Option<String>,

        /// 任意のテキストを手動選択として保存
        #[arg(short, long)]
        text: Option<String>,
    },

    /// データ倉庫の一覧
    List {
        /// 日付で絞り込み（YYYY-MM-DD）
        #[arg(short, long)]
        date: Option<String>,

        /// キーワードで絞り込み
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// データ倉庫にある日付の一覧
    Dates,

    /// ログインしてセッションを保存
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドのURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// セッションCookieを設定（空文字で削除）
        #[arg(long)]
        set_session: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
