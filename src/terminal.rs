//! Plain-text dashboard renderer.

use std::io::Write;

use crossterm::style::{Color, Stylize};
use skycast_store::Theme;
use skycast_weather::{Backdrop, DashboardView, Presenter};

const BAR_WIDTH: usize = 24;

pub struct TerminalPresenter<W: Write> {
    out: W,
    width: usize,
    color: bool,
    theme: Theme,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, width: u16, color: bool, theme: Theme) -> Self {
        Self {
            out,
            width: usize::from(width),
            color,
            theme,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn accent(&self, backdrop: Backdrop) -> Color {
        match (backdrop, self.theme) {
            (Backdrop::Sunny, Theme::Light) => Color::DarkYellow,
            (Backdrop::Sunny, Theme::Dark) => Color::Yellow,
            (Backdrop::Rainy, Theme::Light) => Color::DarkBlue,
            (Backdrop::Rainy, Theme::Dark) => Color::Blue,
            (Backdrop::Cloudy, _) => Color::Grey,
            (Backdrop::Snowy, _) => Color::Cyan,
            (Backdrop::Plain, Theme::Light) => Color::Black,
            (Backdrop::Plain, Theme::Dark) => Color::White,
        }
    }

    fn heading(&self, text: &str, color: Color) -> String {
        if self.color {
            text.bold().with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    fn write_view(&mut self, view: &DashboardView) -> std::io::Result<()> {
        let current = &view.current;
        let symbol = view.unit.temperature_symbol();
        let accent = self.accent(current.backdrop);

        let title = self.heading(&current.location, accent);
        writeln!(self.out, "{}", self.rule())?;
        writeln!(self.out, "{}  {}", title, current.description)?;
        writeln!(
            self.out,
            "{}{}  feels like {}°",
            current.temperature, symbol, current.feels_like
        )?;
        writeln!(
            self.out,
            "Humidity {}%  Wind {} {}  Pressure {} hPa  Clouds {}%",
            current.humidity_pct,
            current.wind_speed,
            view.unit.speed_label(),
            current.pressure_hpa,
            current.cloud_cover_pct
        )?;
        writeln!(
            self.out,
            "Sunrise {}  Sunset {}",
            current.sunrise, current.sunset
        )?;

        if !view.days.is_empty() {
            writeln!(self.out)?;
            let heading = self.heading("Forecast", accent);
            writeln!(self.out, "{}", heading)?;
            for day in &view.days {
                writeln!(
                    self.out,
                    "{:<12} {:>4}°  {}",
                    day.label,
                    day.avg_temp,
                    day.condition.display_description()
                )?;
            }
        }

        if !view.hourly.is_empty() {
            writeln!(self.out)?;
            let heading = self.heading("Next hours", accent);
            writeln!(self.out, "{}", heading)?;
            let temps: Vec<f64> = view.hourly.iter().map(|p| p.temperature).collect();
            for (point, bar) in view.hourly.iter().zip(bars(&temps, BAR_WIDTH)) {
                writeln!(
                    self.out,
                    "{:>5} {:>6.1}{} {}",
                    point.label, point.temperature, symbol, bar
                )?;
            }
        }

        writeln!(
            self.out,
            "\nLast: {}",
            view.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.out, "{}", self.rule())?;
        self.out.flush()
    }
}

/// Bar lengths scaled between the series minimum and maximum.
fn bars(values: &[f64], width: usize) -> Vec<String> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|v| {
            let len = if span > f64::EPSILON {
                1 + (((v - min) / span) * (width.saturating_sub(1)) as f64).round() as usize
            } else {
                width / 2
            };
            "#".repeat(len)
        })
        .collect()
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprintln!("Loading...");
        }
    }

    fn render(&mut self, view: &DashboardView) {
        if let Err(e) = self.write_view(view) {
            tracing::error!("Failed to write dashboard: {}", e);
        }
    }

    fn notice(&mut self, message: &str) {
        let line = if self.color {
            message.with(Color::Red).to_string()
        } else {
            message.to_string()
        };
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::error!("Failed to write notice: {}", e);
        }
    }
}
