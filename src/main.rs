use anyhow::{Context, Result};

use bookboard::core::cli::CliPaths;
use bookboard::core::context::AppContext;
use bookboard::core::types::ViewportClass;
use bookboard::logging::LogTarget;
use bookboard::timeline::board::{BoardSettings, LoggerObserver, TimelineBoard};
use bookboard::timeline::packages::SnapshotPackages;
use bookboard::ui::board_printer::BoardPrinter;
use bookboard::ui::width_util::WidthUtil;

/// Terminals narrower than this get the mobile profile.
const MOBILE_BELOW_COLUMNS: usize = 100;

fn viewport_class(forced_mobile: bool, util: &WidthUtil) -> ViewportClass {
    if forced_mobile || util.terminal_width() < MOBILE_BELOW_COLUMNS {
        ViewportClass::Mobile
    } else {
        ViewportClass::Desktop
    }
}

fn main() -> Result<()> {
    let paths = CliPaths::from_env().context("Invalid command line")?;
    let ctx = AppContext::new_with_paths(paths).context("Failed to start the board")?;
    let snapshot = ctx
        .load_snapshot()
        .context("Failed to load the board snapshot")?;

    let util = WidthUtil;
    let viewport = viewport_class(ctx.paths.mobile, &util);
    let settings = BoardSettings::from_config(&ctx.config, viewport);
    let printer =
        BoardPrinter::new(settings.profile).with_color(util.terminal_columns().is_some());

    // Grid width in profile pixels that fits the terminal.
    let visible_cells = util.terminal_width() as f64 / printer.cell_chars() as f64;
    let viewport_width = visible_cells * settings.profile.cell_width;

    let mut board = TimelineBoard::new(settings, ctx.start_date(), viewport_width);
    let observer = LoggerObserver::new(ctx.logger.clone());
    board.viewport_mut().on_scroll(0.0, &observer);

    let packages = SnapshotPackages::new(&snapshot.packages);
    let frame = board.frame(&snapshot, &packages, &ctx.logger);
    printer.print(&frame);

    ctx.logger.info(
        format!(
            "Rendered {} units from {} to {} ({} view).",
            frame.rows.len(),
            frame.start,
            frame.last,
            viewport
        ),
        LogTarget::FileOnly,
    );
    Ok(())
}
