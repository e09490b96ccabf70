use insta::assert_snapshot;
use occupancy_deck::app::assets::FsProbe;
use occupancy_deck::app::narrative::{NarrativeOptions, build_narrative_deck};

#[test]
fn text_only_outline_titles() {
    let temp = tempfile::tempdir().expect("temp dir");
    let options = NarrativeOptions {
        plots_dir: temp.path().to_path_buf(),
    };
    let deck = build_narrative_deck(&options, &FsProbe).expect("deck builds");

    let titles = deck
        .slides()
        .iter()
        .map(|slide| slide.title())
        .collect::<Vec<_>>()
        .join("\n");

    assert_snapshot!(titles, @r"
Predizione dell'Occupazione della Stanza
Indice della Presentazione
Introduzione al Progetto
Obiettivi Specifici del Progetto
Dataset Utilizzati
Caratteristiche del Dataset
Distribuzione dell'Occupazione per Giorno
Analisi Temporale Oraria
Andamento Temporale delle Features
Box Plots delle Features
Analisi dei Box Plots
Scelta dell'Algoritmo: Random Forest
Metodologia di Ottimizzazione
Risultati Grid Search
Parametri Ottimali Selezionati
Training del Modello
Metriche di Valutazione Utilizzate
Risultati sul Testing Set
Validazione su Dataset Separato (datatest2.txt)
Feature Importance
Interpretazione Feature Importance
Struttura degli Alberi Decisionali
Vantaggi della Soluzione Implementata
Applicazioni Pratiche
Limitazioni e Possibili Miglioramenti
Stack Tecnologico
Conclusioni
Grazie per l'Attenzione!
");
}
