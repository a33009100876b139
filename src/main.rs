use clap::Parser;
use tracing_subscriber::EnvFilter;
use xiaoyu_common::{
    filter_data, load_dates, perform_search, save_selected, PageAction, PageContext,
    RawDataFilter, SaveInput, SaveState, SearchState, Selection, WarehouseState, REDIRECT_DELAY,
};
use xiaoyu_search::{cli, client, config, error, output, picker};
use cli::{Cli, Commands};
use client::HttpBackend;
use config::Config;
use error::Result;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(url) = cli.base_url.clone() {
        config.set_base_url(url)?;
    }

    match cli.command {
        Commands::Search { keyword, page } => {
            let backend = HttpBackend::new(&config)?;
            let mut state = SearchState::default();

            let pb = output::spinner();
            let outcome = perform_search(&backend, &mut state, &keyword).await;
            pb.finish_and_clear();

            let outcome = outcome?;
            output::print_alert(outcome.alert());
            if page > 1 && !state.change_page(PageAction::Goto(page)) {
                eprintln!("页码超出范围，显示第 {} 页", state.current_page());
            }
            output::print_results(&state);
        }

        Commands::Save { keyword, pick, text } => {
            let backend = HttpBackend::new(&config)?;
            let mut search = SearchState::default();

            let pb = output::spinner();
            let outcome = perform_search(&backend, &mut search, &keyword).await;
            pb.finish_and_clear();
            output::print_alert(outcome?.alert());

            let checked = match (&pick, &text) {
                (Some(picks), _) => picker::parse_picks(picks, search.results())?,
                (None, Some(_)) => Vec::new(),
                (None, None) => picker::prompt_picks(search.results())?,
            };
            let selection = Selection::new(text.as_deref().unwrap_or_default(), checked);
            let page_url = format!("{}/dashboard", backend.base_url());
            let input = SaveInput {
                context: PageContext::SearchResults,
                selection: &selection,
                keyword_input: &keyword,
                page_url: &page_url,
            };

            let pb = output::spinner();
            let saved = save_selected(&backend, &mut SaveState::default(), &search, &input).await;
            pb.finish_and_clear();

            let saved = saved?;
            output::print_alert(saved.alert());

            if saved.should_redirect() {
                // 保存結果を確認できるようデータ倉庫を表示
                tokio::time::sleep(REDIRECT_DELAY).await;
                let mut warehouse = WarehouseState::default();
                let listed =
                    filter_data(&backend, &mut warehouse, RawDataFilter::new("", &keyword)).await;
                if let Some(alert) = listed.alert() {
                    output::print_alert(alert);
                }
                output::print_warehouse(&warehouse);
            }
        }

        Commands::List { date, keyword } => {
            let backend = HttpBackend::new(&config)?;
            let mut state = WarehouseState::default();
            let filter = RawDataFilter::new(
                date.unwrap_or_default(),
                keyword.as_deref().unwrap_or_default(),
            );

            let pb = output::spinner();
            let outcome = filter_data(&backend, &mut state, filter).await;
            pb.finish_and_clear();

            if let Some(alert) = outcome.alert() {
                output::print_alert(alert);
            }
            output::print_warehouse(&state);
        }

        Commands::Dates => {
            let backend = HttpBackend::new(&config)?;
            let mut state = WarehouseState::default();
            let dates = load_dates(&backend, &mut state).await?;
            if dates.is_empty() {
                println!("{}", xiaoyu_common::render::EMPTY_DATA);
            }
            for date in dates {
                println!("{}", date);
            }
        }

        Commands::Login { username, password } => {
            let cookie = client::login(&config, &username, &password).await?;
            config.set_session(cookie);
            config.save()?;
            println!("✔ 登录成功，会话已保存");
        }

        Commands::Config { set_base_url, set_session, show } => {
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                changed = true;
            }

            if let Some(cookie) = set_session {
                config.set_session(cookie);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 设置已保存");
            }

            if show || !changed {
                println!("设置:");
                println!("  后端地址: {}", config.base_url());
                println!("  搜索超时: {}秒", config.search_timeout_secs);
                println!("  保存超时: {}秒", config.save_timeout_secs);
                println!(
                    "  会话: {}",
                    if config.session_cookie().is_some() { "已设置" } else { "未设置" }
                );
            }
        }
    }

    Ok(())
}
