use clap::Parser;
use contract_assembler::core::ConfigProvider;
use contract_assembler::utils::error::{ContractError, ErrorSeverity};
use contract_assembler::utils::{logger, validation::Validate};
use contract_assembler::{
    CliConfig, ContractAssembler, HttpRecordSource, LocalStorage, PartyIds, PartyKind, PdfPrinter,
};

fn report_failure(e: &ContractError) -> i32 {
    tracing::error!(
        "❌ Contract assembly failed: {} (Kind: {}, Category: {:?}, Severity: {:?})",
        e,
        e.kind().code(),
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 阻斷式提示
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting contract-assembler CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => std::process::exit(report_failure(&e)),
    };

    let ids = PartyIds::new(
        settings
            .identifier(PartyKind::Contracting)
            .unwrap_or_default(),
        settings.identifier(PartyKind::Contracted).unwrap_or_default(),
    );

    let assembler = HttpRecordSource::pair(&settings)
        .and_then(|(contracting, contracted)| {
            let printer = PdfPrinter::new(LocalStorage::new(settings.output_path()));
            ContractAssembler::new(contracting, contracted, printer)
        })
        .and_then(|assembler| {
            Ok(match settings.share_target()? {
                Some(target) => assembler.with_share_target(target),
                None => assembler,
            })
        })
        .map(|assembler| assembler.with_monitoring(settings.monitor));

    let assembler = match assembler {
        Ok(assembler) => assembler,
        Err(e) => std::process::exit(report_failure(&e)),
    };

    match assembler.run(&ids).await {
        Ok(report) => {
            tracing::info!("✅ Contract generated successfully!");
            println!("✅ Contrato gerado: {}", report.document.path.display());
            if let Some(receipt) = report.receipt {
                println!("📤 PDF compartilhado! {}", receipt.location);
            }
        }
        Err(e) => {
            let exit_code = report_failure(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
