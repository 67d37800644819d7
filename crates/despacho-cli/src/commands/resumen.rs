//! Practice dashboard command.

use despacho_core::termino::TerminoStats;
use despacho_core::{dates, DespachoDb};
use serde::Serialize;

/// Combined dashboard payload: record counters plus the término aggregate.
#[derive(Serialize)]
struct ResumenCompleto {
    total_casos: usize,
    casos_activos: usize,
    audiencias_hoy: usize,
    notas_pendientes: usize,
    terminos: TerminoStats,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;
    let hoy = dates::hoy();

    let resumen = db.resumen(hoy)?;
    let terminos = db.list_terminos(None, 10_000)?;
    let stats = TerminoStats::calcular(&terminos, hoy);

    println!(
        "{} casos ({} activos) • {} audiencia(s) hoy • {} nota(s) pendientes",
        resumen.total_casos, resumen.casos_activos, resumen.audiencias_hoy, resumen.notas_pendientes
    );
    println!(
        "Términos: {} pendientes • {} próximos a vencer • {} vencidos",
        stats.total_pendientes, stats.proximos_vencer, stats.vencidos
    );

    let payload = ResumenCompleto {
        total_casos: resumen.total_casos,
        casos_activos: resumen.casos_activos,
        audiencias_hoy: resumen.audiencias_hoy,
        notas_pendientes: resumen.notas_pendientes,
        terminos: stats,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
