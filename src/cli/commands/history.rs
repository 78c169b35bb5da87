use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::core::rates::PayRates;
use crate::db::log::ttlog_best_effort;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

/// Handle the `history` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History {
        print,
        reset,
        export,
        force,
    } = cmd
    {
        let mut history = store::open(cfg)?;
        let rates = PayRates::from(cfg);

        // Export first so that `--export F --reset` keeps a copy.
        if let Some(file) = export {
            let path = expand_tilde(file);
            let n = HistoryLogic::export(history.as_mut(), &path, *force)?;
            success(format!(
                "Exported {} multipliers to {}",
                n,
                path.display()
            ));
        }

        if *reset {
            let dropped = HistoryLogic::reset(history.as_mut())?;
            ttlog_best_effort(
                cfg,
                "reset",
                "calibration history",
                &format!("Dropped {} multipliers", dropped),
            );
            success(format!("Calibration history cleared ({} dropped)", dropped));
        }

        if *print || (!*reset && export.is_none()) {
            HistoryLogic::print(history.as_mut(), &rates)?;
        }
    }

    Ok(())
}
