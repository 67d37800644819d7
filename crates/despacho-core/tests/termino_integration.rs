//! End-to-end flow: store a set of términos, then classify, filter and
//! aggregate them against a fixed "today".

use chrono::NaiveDate;
use despacho_core::{
    termino::{filtrar_y_ordenar, TerminoFilter, TerminoStats},
    Caso, Cliente, DespachoDb, Termino, TerminoEstado, TerminoTipo, Urgencia,
};

fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Practica {
    db: DespachoDb,
    caso_id: String,
}

fn practica() -> Practica {
    let db = DespachoDb::open_memory().unwrap();
    let cliente = Cliente::nuevo("Constructora del Valle SA").unwrap();
    db.create_cliente(&cliente).unwrap();
    let caso = Caso::nuevo("Rescisión de contrato de obra", &cliente.id, fecha(2026, 1, 5)).unwrap();
    db.create_caso(&caso).unwrap();
    Practica {
        db,
        caso_id: caso.id,
    }
}

fn sembrar_terminos(p: &Practica, hoy: NaiveDate) {
    let entradas = [
        ("Desahogo de vista", -5, TerminoTipo::Procesal),
        ("Contestar demanda", 0, TerminoTipo::Fatal),
        ("Ofrecer pruebas", 2, TerminoTipo::Procesal),
        ("Entrega convenida de peritaje", 10, TerminoTipo::Convencional),
    ];
    for (titulo, offset, tipo) in entradas {
        let mut t = Termino::nuevo(
            titulo,
            &p.caso_id,
            hoy + chrono::Duration::days(offset),
        )
        .unwrap();
        t.tipo = tipo;
        p.db.create_termino(&t).unwrap();
    }
}

#[test]
fn flujo_completo_de_terminos() {
    let hoy = fecha(2026, 3, 15);
    let p = practica();
    sembrar_terminos(&p, hoy);

    let todos = p.db.list_terminos(None, 100).unwrap();
    assert_eq!(todos.len(), 4);

    // Snapshot aggregation with an injected today.
    let stats = TerminoStats::calcular(&todos, hoy);
    assert_eq!(stats.total_pendientes, 4);
    assert_eq!(stats.vencidos, 1);
    // The past-due término counts toward próximos too.
    assert_eq!(stats.proximos_vencer, 3);

    // Per-término classification drives the labels presentation renders.
    let por_titulo = |titulo: &str| {
        todos
            .iter()
            .find(|t| t.titulo == titulo)
            .unwrap()
            .urgencia(hoy)
    };
    assert_eq!(por_titulo("Desahogo de vista").etiqueta, "Venció hace 5 día(s)");
    assert_eq!(por_titulo("Contestar demanda").etiqueta, "¡Vence HOY!");
    assert_eq!(por_titulo("Ofrecer pruebas").urgencia, Urgencia::Proximo);
    assert_eq!(por_titulo("Entrega convenida de peritaje").urgencia, Urgencia::Normal);
}

#[test]
fn cumplir_termino_lo_saca_de_los_contadores() {
    let hoy = fecha(2026, 3, 15);
    let p = practica();
    sembrar_terminos(&p, hoy);

    let vencido = p
        .db
        .list_terminos(None, 100)
        .unwrap()
        .into_iter()
        .find(|t| t.esta_vencido(hoy))
        .unwrap();
    let cumplido = p.db.marcar_termino_cumplido(&vencido.id).unwrap();
    assert_eq!(cumplido.estado, TerminoEstado::Cumplido);

    let despues = p.db.list_terminos(None, 100).unwrap();
    let stats = TerminoStats::calcular(&despues, hoy);
    assert_eq!(stats.total_pendientes, 3);
    assert_eq!(stats.vencidos, 0);
    assert_eq!(stats.proximos_vencer, 2);

    // Fulfilled in the past is Cumplido, never Vencido.
    let info = p
        .db
        .get_termino(&vencido.id)
        .unwrap()
        .unwrap()
        .urgencia(hoy);
    assert_eq!(info.urgencia, Urgencia::Cumplido);
    assert_eq!(info.etiqueta, "✓ Cumplido");
}

#[test]
fn filtros_de_la_vista_de_lista() {
    let hoy = fecha(2026, 3, 15);
    let p = practica();
    sembrar_terminos(&p, hoy);
    p.db.marcar_termino_cumplido(
        &p.db.list_terminos(None, 100).unwrap()[3].id, // el más lejano
    )
    .unwrap();

    let snapshot = || p.db.list_terminos(None, 100).unwrap();

    let pendientes = filtrar_y_ordenar(snapshot(), TerminoFilter::Pendientes, hoy);
    assert_eq!(pendientes.len(), 2); // hoy y en 2 días; el vencido queda fuera
    assert!(pendientes.iter().all(|t| !t.esta_vencido(hoy)));

    let vencidos = filtrar_y_ordenar(snapshot(), TerminoFilter::Vencidos, hoy);
    assert_eq!(vencidos.len(), 1);

    let cumplidos = filtrar_y_ordenar(snapshot(), TerminoFilter::Cumplidos, hoy);
    assert_eq!(cumplidos.len(), 1);

    let todos = filtrar_y_ordenar(snapshot(), TerminoFilter::Todos, hoy);
    assert_eq!(todos.len(), 4);
    let dias: Vec<i64> = todos.iter().map(|t| t.dias_restantes(hoy)).collect();
    assert_eq!(dias, [-5, 0, 2, 10]);
}

#[test]
fn ventana_proximos_de_la_consulta() {
    let hoy = fecha(2026, 3, 15);
    let p = practica();
    sembrar_terminos(&p, hoy);

    // The store-side window matches the aggregate's 3-day threshold.
    let proximos = p.db.list_terminos_proximos(hoy, 3).unwrap();
    let stats = TerminoStats::calcular(&p.db.list_terminos(None, 100).unwrap(), hoy);
    assert_eq!(proximos.len(), stats.proximos_vencer);
}
