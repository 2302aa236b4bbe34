use clap::Parser;
use waitlist_view::core::view::WaitlistView;
use waitlist_view::utils::error::{ErrorSeverity, WaitlistError};
use waitlist_view::utils::{logger, validation::Validate};
use waitlist_view::{source_for, CliConfig, Column, NoopListener, SearchMode, ViewSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.resolve().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting waitlist-view");
    tracing::debug!("Effective settings: {:?}", settings);

    let mut view =
        WaitlistView::with_page_size(NoopListener, settings.page_size, settings.max_page_buttons);
    let source = source_for(&settings.source);
    view.mount(&*source).await;

    // 套用篩選條件
    view.set_query(config.query.clone());
    view.set_service_type(config.service_type.clone());
    view.set_status(config.status.clone());
    view.set_search_mode(config.mode);

    for name in &config.select_services {
        view.toggle_service(name);
    }
    if config.select_all {
        view.set_all_rows_selected(true);
    }
    for index in &config.select_rows {
        view.toggle_row(*index);
    }

    if config.page != 1 && !view.go_to_page(config.page) {
        tracing::warn!(
            "Page {} is outside 1..={}, staying on page {}",
            config.page,
            view.pagination().total_pages(),
            view.pagination().current_page()
        );
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&view_as_json(&view, &settings))?);
    } else {
        print_view(&view, &settings);
    }

    Ok(())
}

fn exit_with(e: &WaitlistError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_view(view: &WaitlistView<NoopListener>, settings: &ViewSettings) {
    let filtered = view.filtered();
    // 名稱搜尋在輸入查詢字串前不顯示清單
    let show_services = match view.mode() {
        SearchMode::ByName => !view.query().is_empty(),
        SearchMode::ByTags => true,
    };

    if show_services {
        println!("{}", view.summary());
        for service in view.service_badges() {
            let marker = if service.selected { "[x]" } else { "[ ]" };
            let statuses: Vec<&str> = service.statuses.iter().map(|status| status.as_str()).collect();
            println!("  {} {}  ({})", marker, service.name, statuses.join(", "));
        }
        if filtered.no_results {
            println!("  No results found");
        }
        println!();
    }

    print_table(view, &settings.columns);

    let pagination = view.pagination();
    let buttons: Vec<String> = pagination
        .page_buttons()
        .map(|page| {
            if page == pagination.current_page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    println!();
    println!(
        "{}    {} Previous | {} | Next {}",
        pagination.summary(),
        if pagination.has_previous() { "<" } else { " " },
        buttons.join(" "),
        if pagination.has_next() { ">" } else { " " },
    );
}

fn print_table(view: &WaitlistView<NoopListener>, columns: &[Column]) {
    let rows = view.page_rows();
    let header_box = if view.all_rows_selected() { "[x]" } else { "[ ]" };

    let mut widths: Vec<usize> = columns.iter().map(|column| column.label().len()).collect();
    for row in &rows {
        for (width, column) in widths.iter_mut().zip(columns) {
            *width = (*width).max(row.entry.cell(*column).chars().count());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.label(), width = *width))
        .collect();
    println!("{} {}", header_box, header.join("  "));

    for row in &rows {
        let marker = if row.selected { "[x]" } else { "[ ]" };
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:<width$}", row.entry.cell(*column), width = *width))
            .collect();
        println!("{} {}", marker, cells.join("  "));
    }
}

fn view_as_json(view: &WaitlistView<NoopListener>, settings: &ViewSettings) -> serde_json::Value {
    let pagination = view.pagination();
    let rows: Vec<serde_json::Value> = view
        .page_rows()
        .iter()
        .map(|row| {
            let mut cells = serde_json::Map::new();
            for column in &settings.columns {
                cells.insert(
                    column.key().to_string(),
                    serde_json::Value::String(row.entry.cell(*column).to_string()),
                );
            }
            serde_json::json!({
                "index": row.index,
                "selected": row.selected,
                "cells": cells,
            })
        })
        .collect();

    let services: Vec<serde_json::Value> = view
        .service_badges()
        .iter()
        .map(|service| {
            serde_json::json!({
                "name": service.name,
                "selected": service.selected,
                "statuses": service
                    .statuses
                    .iter()
                    .map(|status| serde_json::json!({"status": status.as_str(), "badge": status.badge()}))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "summary": view.summary(),
        "filtered": view.filtered(),
        "services": services,
        "selectedServices": view.selected_services(),
        "selectedRows": view.selected_rows(),
        "allRowsSelected": view.all_rows_selected(),
        "rows": rows,
        "pagination": {
            "currentPage": pagination.current_page(),
            "totalPages": pagination.total_pages(),
            "pageSize": pagination.page_size(),
            "pageButtons": pagination.page_buttons().collect::<Vec<_>>(),
            "summary": pagination.summary(),
        },
    })
}
