use log::info;
use wiki_quiz::QuizApp;
use wiki_quiz::config::ApiConfig;

fn main() -> eframe::Result<()> {
    // .env opcional, como VITE_* en el cliente web
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = ApiConfig::from_env();
    info!("backend de cuestionarios en {}", config.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Quiz Generator",
        options,
        Box::new(move |cc| Ok(Box::new(QuizApp::restore(cc, config)))),
    )
}
