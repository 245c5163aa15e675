mod config;
mod fonts;
mod view;

use stopwatch_engine::logging::{init_logging, LoggingConfig};
use stopwatch_ui::Application;

use crate::config::StopwatchConfig;
use crate::view::StopwatchView;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = StopwatchConfig::default();
    let (width, height) = config.size;
    let (min_width, min_height) = config.min_size;

    let mut app = Application::new()
        .title(config.title.as_str())
        .size(width, height)
        .min_size(min_width, min_height)
        .always_on_top(config.always_on_top)
        .opacity(config.opacity)
        .background(config.theme.background);

    for (name, bytes) in fonts::discover() {
        app = app.font(name, bytes);
    }

    log::info!("starting {}", config.title);
    app.run(StopwatchView::new(config.theme))
}
