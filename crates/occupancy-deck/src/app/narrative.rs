//! The room-occupancy project narrative.

use std::path::PathBuf;

use crate::app::assets::AssetProbe;
use crate::app::builder::{DeckBuilder, Figure};
use crate::domain::errors::DomainError;
use crate::domain::model::Deck;
use crate::infra::config::Config;

/// Number of slides the narrative always produces.
pub const NARRATIVE_SLIDE_COUNT: usize = 28;

/// Inputs for building the narrative deck.
#[derive(Debug, Clone)]
pub struct NarrativeOptions {
    /// Directory holding the pre-rendered charts.
    pub plots_dir: PathBuf,
}

impl NarrativeOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            plots_dir: config.assets.plots_dir(),
        }
    }
}

impl Default for NarrativeOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub const PRESENCE_BY_DAY: Figure = Figure {
    file_name: "campioni_con_presenza_per_giorno.png",
    title: "Distribuzione dell'Occupazione per Giorno",
    caption: "Analisi della presenza per giorno della settimana",
    fallback_title: "Distribuzione dell'Occupazione per Giorno",
    fallback_points: &[
        "Analisi della presenza per giorno della settimana",
        "Osservazioni principali:",
        "  - Alta presenza: Lunedì, Giovedì, Venerdì",
        "  - Nessuna presenza: Sabato e Domenica",
        "  - Pattern tipico di ambiente lavorativo/scolastico",
    ],
};

pub const HOURLY_HEATMAP: Figure = Figure {
    file_name: "heatmap_campioni_per_ora.png",
    title: "Heatmap: Campioni per Ora del Giorno",
    caption: "Distribuzione oraria dell'occupazione",
    fallback_title: "Analisi Temporale Oraria",
    fallback_points: &[
        "Distribuzione dell'occupazione nelle diverse ore",
        "Pattern orari identificati",
        "Correlazione con orari lavorativi/scolastici",
    ],
};

pub const FEATURE_TIMELINE: Figure = Figure {
    file_name: "andamento_temporale_features.png",
    title: "Andamento Temporale delle Features",
    caption: "Visualizzazione dell'andamento di ogni feature nel tempo (rosso = presenza)",
    fallback_title: "Andamento Temporale delle Features",
    fallback_points: &[
        "Visualizzazione usando small multiples",
        "Evidenziazione in rosso quando qualcuno è presente",
        "Separazione dei giorni con barre verticali",
        "Analisi delle correlazioni temporali",
    ],
};

pub const BOX_PLOTS: Figure = Figure {
    file_name: "box_plots.png",
    title: "Box Plots: Distribuzione Features per Occupancy",
    caption: "Confronto delle distribuzioni con e senza occupazione",
    fallback_title: "Box Plots delle Features",
    fallback_points: &[
        "Distribuzione delle features rispetto all'occupazione",
        "Comparazione tra Occupancy=0 e Occupancy=1",
    ],
};

pub const GRID_SEARCH_FREQUENCIES: Figure = Figure {
    file_name: "frequenze_parametri_migliori_50_grid_search.png",
    title: "Frequenze dei Parametri Migliori",
    caption: "Distribuzione dei parametri ottimali su 50 esecuzioni diverse",
    fallback_title: "Risultati Grid Search",
    fallback_points: &[
        "Visualizzazione della frequenza dei parametri ottimali",
        "Parametri con moda evidenziata",
        "Conferma della scelta robusta degli iper-parametri",
    ],
};

pub const FEATURE_IMPORTANCE: Figure = Figure {
    file_name: "feature_importances_random_forest.png",
    title: "Importanza delle Features",
    caption: "Importanza relativa di ogni feature nel modello Random Forest",
    fallback_title: "Feature Importance",
    fallback_points: &[
        "Analisi dell'importanza delle features nella Random Forest",
        "Identifica quali features influenzano maggiormente la predizione",
    ],
};

pub const FOREST_TREE: Figure = Figure {
    file_name: "tree_random_forest.png",
    title: "Esempio: Un Albero della Random Forest",
    caption: "Visualizzazione di uno degli alberi decisionali della Random Forest",
    fallback_title: "Struttura degli Alberi Decisionali",
    fallback_points: &[
        "La Random Forest è composta da multipli alberi",
        "Ogni albero fa decisioni basate sulle features",
        "Struttura gerarchica di split decisionali",
    ],
};

/// Every chart the narrative can embed, in presentation order.
pub const FIGURES: [Figure; 7] = [
    PRESENCE_BY_DAY,
    HOURLY_HEATMAP,
    FEATURE_TIMELINE,
    BOX_PLOTS,
    GRID_SEARCH_FREQUENCIES,
    FEATURE_IMPORTANCE,
    FOREST_TREE,
];

/// Build the full 28-slide deck; charts missing under `plots_dir` degrade to text.
pub fn build_narrative_deck(
    options: &NarrativeOptions,
    probe: &dyn AssetProbe,
) -> Result<Deck, DomainError> {
    tracing::info!(plots_dir = %options.plots_dir.display(), "building narrative deck");

    let plots = options.plots_dir.as_path();
    let mut deck = DeckBuilder::new(probe);

    // 1
    deck.add_title_slide(
        "Predizione dell'Occupazione della Stanza",
        "Progetto di Machine Learning con Random Forest\n\nAnalisi, Implementazione e Risultati",
    )?;

    // 2
    deck.add_content_slide(
        "Indice della Presentazione",
        [
            "Introduzione e Obiettivi",
            "Dataset e Caratteristiche",
            "Analisi Esplorativa dei Dati",
            "Visualizzazione delle Features",
            "Metodologia di Classificazione",
            "Ottimizzazione degli Iper-parametri",
            "Training del Modello",
            "Valutazione delle Performance",
            "Feature Importance",
            "Conclusioni e Risultati Finali",
        ],
    )?;

    // 3
    deck.add_content_slide(
        "Introduzione al Progetto",
        [
            "Obiettivo: Predire l'occupazione di una stanza basandosi su sensori ambientali",
            "Approccio: Machine Learning con algoritmo Random Forest",
            "Dataset: Dati da sensori di temperatura, umidità, luce, CO2 e umidità",
            "Applicazioni pratiche:",
            "  - Gestione energetica intelligente degli edifici",
            "  - Ottimizzazione del condizionamento",
            "  - Sicurezza e monitoraggio degli spazi",
        ],
    )?;

    // 4
    deck.add_content_slide(
        "Obiettivi Specifici del Progetto",
        [
            "Analizzare e comprendere il dataset di occupazione",
            "Identificare le features più rilevanti per la predizione",
            "Implementare un modello di classificazione Random Forest",
            "Ottimizzare gli iper-parametri tramite Grid Search",
            "Valutare le performance con multiple metriche",
            "Validare il modello su dataset separati",
        ],
    )?;

    // 5
    deck.add_content_slide(
        "Dataset Utilizzati",
        [
            "Tre file di dataset:",
            "  - datatraining.txt: dati per il training iniziale",
            "  - datatest.txt: primo set di test",
            "  - datatest2.txt: validazione finale separata",
            "Features disponibili:",
            "  - Temperature (Temperatura)",
            "  - Humidity (Umidità)",
            "  - Light (Luminosità)",
            "  - CO2 (Anidride Carbonica)",
            "  - HumidityRatio (Rapporto di Umidità)",
            "Target: Occupancy (0 = non occupata, 1 = occupata)",
        ],
    )?;

    // 6
    deck.add_content_slide(
        "Caratteristiche del Dataset",
        [
            "Dati temporali con timestamp",
            "Campionamento continuo nel tempo",
            "Divisione strategica dei dati:",
            "  - 75% per training",
            "  - 25% per testing (subsampling stratificato)",
            "Mantenimento del dataset test2 per validazione finale",
            "Separazione features (X) e label (y) per entrambi i set",
        ],
    )?;

    // 7-10
    deck.add_figure(plots, &PRESENCE_BY_DAY)?;
    deck.add_figure(plots, &HOURLY_HEATMAP)?;
    deck.add_figure(plots, &FEATURE_TIMELINE)?;
    deck.add_figure(plots, &BOX_PLOTS)?;

    // 11
    deck.add_content_slide(
        "Analisi dei Box Plots",
        [
            "Humidity: i notch si sovrappongono",
            "  - Le distribuzioni potrebbero essere simili",
            "  - Feature probabilmente meno importante per la classificazione",
            "Temperature: differenze significative",
            "  - I notch non si sovrappongono",
            "  - Feature importante per discriminare l'occupazione",
            "Light, CO2, HumidityRatio: pattern distintivi evidenti",
        ],
    )?;

    // 12
    deck.add_content_slide(
        "Scelta dell'Algoritmo: Random Forest",
        [
            "Perché Random Forest?",
            "  - Ensemble method robusto",
            "  - Gestisce bene features non lineari",
            "  - Riduce overfitting rispetto a singoli alberi",
            "  - Fornisce feature importance",
            "  - Ottimo bilanciamento bias-variance",
            "Caratteristiche:",
            "  - Molteplici alberi di decisione",
            "  - Voting per la predizione finale",
            "  - Bootstrap aggregating (bagging)",
        ],
    )?;

    // 13
    deck.add_content_slide(
        "Metodologia di Ottimizzazione",
        [
            "Grid Search con 50 random_state diversi",
            "Parametri ottimizzati:",
            "  - n_estimators: [100, 200, 500]",
            "  - min_samples_split: [2, 5, 10]",
            "  - min_samples_leaf: [1, 2, 5]",
            "  - max_samples: [0.5, 0.8, 1.0]",
            "  - max_depth: [None, 10, 30]",
            "Strategia: calcolare la moda dei parametri ottimali",
            "Obiettivo: trovare i parametri più robusti e generalizzabili",
        ],
    )?;

    // 14
    deck.add_figure(plots, &GRID_SEARCH_FREQUENCIES)?;

    // 15
    deck.add_content_slide(
        "Parametri Ottimali Selezionati",
        [
            "Dai 50 esperimenti di Grid Search:",
            "I parametri con frequenza più alta (moda) sono stati:",
            "  - n_estimators: 500",
            "  - min_samples_split: 2",
            "  - min_samples_leaf: 1",
            "  - max_samples: 0.5",
            "  - max_depth: None (nessun limite)",
            "Gli iper-parametri della moda appaiono con buon distacco",
            "Indica robustezza della configurazione ottimale",
        ],
    )?;

    // 16
    deck.add_content_slide(
        "Training del Modello",
        [
            "Configurazione finale Random Forest con parametri ottimali",
            "Training eseguito su training set (75% dei dati)",
            "Utilizzo di tutti i core disponibili (n_jobs=-1)",
            "Fitting completato con successo",
            "Modello pronto per la fase di testing e validazione",
        ],
    )?;

    // 17
    deck.add_content_slide(
        "Metriche di Valutazione Utilizzate",
        [
            "Matrice di Confusione:",
            "  - True Positives, False Positives, True Negatives, False Negatives",
            "F1-Score: media armonica di Precision e Recall",
            "Recall: capacità di identificare i positivi",
            "Precision: accuratezza delle predizioni positive",
            "ROC Curve: performance al variare della soglia",
            "AUC-ROC: area sotto la curva ROC",
            "  - Misura complessiva indipendente dalla soglia",
        ],
    )?;

    // 18
    deck.add_content_slide(
        "Risultati sul Testing Set",
        [
            "Performance sul test set (subsampling stratificato):",
            "Eccellenti risultati su tutte le metriche",
            "Alta accuratezza nella predizione",
            "Bassi falsi positivi e falsi negativi",
            "ROC-AUC molto elevata",
            "Il modello outperforma significativamente un classificatore casuale",
            "Evidenza di un ottimo lavoro di classificazione",
        ],
    )?;

    // 19
    deck.add_content_slide(
        "Validazione su Dataset Separato (datatest2.txt)",
        [
            "Test finale su dataset completamente indipendente",
            "Simula uno scenario real-world",
            "Risultati coerenti con il testing precedente",
            "Tutti gli indici di performance confermati",
            "Dimostra la capacità di generalizzazione del modello",
            "Il modello non è overfittato sui dati di training",
            "Conferma della robustezza della soluzione",
        ],
    )?;

    // 20
    deck.add_figure(plots, &FEATURE_IMPORTANCE)?;

    // 21
    deck.add_content_slide(
        "Interpretazione Feature Importance",
        [
            "Le features sono classificate per importanza",
            "Light (luminosità) potrebbe essere tra le più importanti",
            "CO2 contribuisce significativamente alla classificazione",
            "Temperature gioca un ruolo importante",
            "HumidityRatio aggiunge informazioni utili",
            "Humidity, come previsto dall'analisi dei box plot, ha minor peso",
            "Conferma delle intuizioni dall'analisi esplorativa",
        ],
    )?;

    // 22
    deck.add_figure(plots, &FOREST_TREE)?;

    // 23
    deck.add_content_slide(
        "Vantaggi della Soluzione Implementata",
        [
            "Accuratezza elevata nelle predizioni",
            "Robustezza dimostrata su dataset separati",
            "Metodologia rigorosa di ottimizzazione",
            "Validazione multipla con diverse metriche",
            "Interpretabilità attraverso feature importance",
            "Scalabilità per applicazioni real-time",
            "Facilità di deployment in sistemi esistenti",
        ],
    )?;

    // 24
    deck.add_content_slide(
        "Applicazioni Pratiche",
        [
            "Smart Building Management:",
            "  - Regolazione automatica HVAC",
            "  - Ottimizzazione consumo energetico",
            "Sicurezza:",
            "  - Monitoraggio accessi non autorizzati",
            "  - Alert in caso di anomalie",
            "Facility Management:",
            "  - Pianificazione pulizie",
            "  - Gestione spazi condivisi",
            "Analisi dati:",
            "  - Pattern di utilizzo degli spazi",
            "  - Ottimizzazione layout uffici",
        ],
    )?;

    // 25
    deck.add_content_slide(
        "Limitazioni e Possibili Miglioramenti",
        [
            "Limitazioni attuali:",
            "  - Dipendenza dalla qualità dei sensori",
            "  - Necessità di calibrazione periodica",
            "  - Limitato a condizioni ambientali simili al training",
            "Sviluppi futuri:",
            "  - Integrazione di sensori aggiuntivi (es. PIR, audio)",
            "  - Transfer learning per nuovi ambienti",
            "  - Predizione del numero di occupanti",
            "  - Implementazione in edge computing devices",
            "  - Dashboard real-time per monitoraggio",
        ],
    )?;

    // 26
    deck.add_content_slide(
        "Stack Tecnologico",
        [
            "Linguaggio: Python 3",
            "Machine Learning: scikit-learn",
            "  - RandomForestClassifier",
            "  - GridSearchCV per ottimizzazione",
            "Data Analysis: pandas",
            "Visualizzazione:",
            "  - matplotlib per grafici",
            "  - seaborn per visualizzazioni statistiche",
            "Environment: Jupyter Notebook",
            "Version Control: Git",
        ],
    )?;

    // 27
    deck.add_content_slide(
        "Conclusioni",
        [
            "Obiettivo raggiunto con successo",
            "Modello Random Forest con ottime performance",
            "Ottimizzazione iper-parametri rigorosa e robusta",
            "Validazione multipla conferma la qualità del modello",
            "Feature importance allineata con l'analisi esplorativa",
            "Soluzione pronta per deployment in scenari reali",
            "Metodologia replicabile e scalabile",
            "Buon bilanciamento tra accuratezza e interpretabilità",
        ],
    )?;

    // 28
    deck.add_title_slide("Grazie per l'Attenzione!", "Domande?")?;

    let deck = deck.finish();
    tracing::info!(
        slides = deck.len(),
        images = deck.embedded_images().count(),
        "narrative deck built"
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    use crate::domain::model::{IndentLevel, Slide};

    struct KnownFiles(HashSet<PathBuf>);

    impl AssetProbe for KnownFiles {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn options() -> NarrativeOptions {
        NarrativeOptions {
            plots_dir: PathBuf::from("plots"),
        }
    }

    fn with_figures(figures: &[Figure]) -> KnownFiles {
        KnownFiles(
            figures
                .iter()
                .map(|figure| Path::new("plots").join(figure.file_name))
                .collect(),
        )
    }

    #[test]
    fn always_builds_twenty_eight_slides() {
        for probe in [with_figures(&[]), with_figures(&FIGURES)] {
            let deck = build_narrative_deck(&options(), &probe).unwrap();
            assert_eq!(deck.len(), NARRATIVE_SLIDE_COUNT);
        }
    }

    #[test]
    fn day_distribution_falls_back_to_bullets() {
        let deck = build_narrative_deck(&options(), &with_figures(&[])).unwrap();
        let slide = deck.slide(7).unwrap();

        assert_eq!(slide.title(), "Distribuzione dell'Occupazione per Giorno");
        assert!(slide.image().is_none());
        let item = slide
            .bullets()
            .iter()
            .find(|item| item.text == "Alta presenza: Lunedì, Giovedì, Venerdì")
            .expect("bullet present");
        assert_eq!(item.level, IndentLevel::Nested);
    }

    #[test]
    fn box_plot_image_replaces_bullets() {
        let deck = build_narrative_deck(&options(), &with_figures(&[BOX_PLOTS])).unwrap();
        let slide = deck.slide(10).unwrap();

        assert!(matches!(slide, Slide::Image(_)));
        assert_eq!(
            slide.image().map(|asset| asset.path()),
            Some(Path::new("plots/box_plots.png"))
        );
        assert_eq!(
            slide.caption(),
            Some("Confronto delle distribuzioni con e senza occupazione")
        );
        assert!(slide.bullets().is_empty());
        assert_eq!(deck.embedded_images().count(), 1);
    }

    #[test]
    fn figures_occupy_fixed_positions() {
        let deck = build_narrative_deck(&options(), &with_figures(&FIGURES)).unwrap();
        let with_images: Vec<usize> = deck
            .slides()
            .iter()
            .enumerate()
            .filter(|(_, slide)| slide.image().is_some())
            .map(|(index, _)| index + 1)
            .collect();
        assert_eq!(with_images, [7, 8, 9, 10, 14, 20, 22]);
    }

    #[test]
    fn rebuilds_are_identical() {
        let probe = with_figures(&[HOURLY_HEATMAP, FOREST_TREE]);
        let first = build_narrative_deck(&options(), &probe).unwrap();
        let second = build_narrative_deck(&options(), &probe).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bookends_are_title_slides() {
        let deck = build_narrative_deck(&options(), &with_figures(&[])).unwrap();
        assert!(matches!(deck.slide(1), Some(Slide::Title(_))));
        assert!(matches!(deck.slide(28), Some(Slide::Title(_))));
        assert_eq!(deck.title(), Some("Predizione dell'Occupazione della Stanza"));
    }
}
