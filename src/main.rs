use clap::Parser;
use photo_mover::cli::Args;
use photo_mover::logging;
use photo_mover::manifest::{write_manifest_file, ManifestWriter};
use photo_mover::output::display_move_report;
use photo_mover::progress::Progress;
use photo_mover::relocate::relocate;
use photo_mover::scanner::scan_media;
use photo_mover::AppError;
use std::io::{self, BufWriter};
use tracing::{debug, error, info};

fn main() {
    let args = Args::parse();
    if let Err(e) = args.validate() {
        e.exit();
    }

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut progress = Progress::new(args.verbose > 0);

    if args.csv {
        let options = args.scan_options();
        info!("Report mode: {:?}", args.src);

        let records = scan_media(&args.src, &options)?;

        match &args.output {
            Some(path) => {
                let rows = write_manifest_file(
                    records.map(|r| r.map_err(AppError::from)),
                    path,
                    options.include_hash,
                )?;
                progress.manifest_written(path, rows);
            }
            None => {
                let stdout = io::stdout();
                let mut writer =
                    ManifestWriter::new(BufWriter::new(stdout.lock()), options.include_hash);
                writer.write_header()?;
                for record in records {
                    writer.write_record(&record?)?;
                }
                let rows = writer.finish()?;
                debug!("Listed {} files", rows);
            }
        }
    } else if let Some(dst) = &args.dst {
        let options = args.relocate_options();
        info!("Move mode: {:?} -> {:?} (dry run: {})", args.src, dst, options.dry_run);

        let result = relocate(&args.src, dst, &options, &mut progress)?;

        display_move_report(&result, &mut io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
    } else {
        // clap enforces --dst outside report mode
        return Err(AppError::Other(format!(
            "No destination given for {}",
            args.src.display()
        )));
    }

    Ok(())
}
