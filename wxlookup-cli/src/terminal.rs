use wxlookup_core::{
    Place, Surface, UnitMode,
    render::{DayCard, HourCard, NowView},
};

/// Writes views to stdout and the status line to stderr.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    interactive: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also announces unit changes, which one-shot commands don't need.
    pub fn interactive() -> Self {
        Self { interactive: true }
    }
}

impl Surface for TerminalSurface {
    fn show_now(&mut self, view: &NowView) {
        println!();
        println!("{}", view.place_label);
        println!(
            "  {}  {}{}  {}",
            view.icon, view.temperature, view.unit, view.description
        );
        println!("  {}", view.meta);
    }

    fn show_hourly(&mut self, cards: &[HourCard]) {
        println!();
        println!("Next hours");
        for card in cards {
            println!(
                "  {:<10} {:>6}  {} {}",
                card.time_label, card.temperature, card.icon, card.label
            );
        }
    }

    fn show_daily(&mut self, cards: &[DayCard]) {
        println!();
        println!("Next days");
        for card in cards {
            println!(
                "  {:<12} {} {:<14} {}",
                card.date_label, card.icon, card.label, card.range
            );
        }
    }

    fn set_status(&mut self, message: &str) {
        if !message.is_empty() {
            eprintln!("{message}");
        }
    }

    fn show_units(&mut self, mode: UnitMode) {
        if self.interactive {
            println!("Units: {mode} ({})", mode.temp_suffix());
        }
    }
}

pub fn print_places(places: &[Place]) {
    for (idx, place) in places.iter().enumerate() {
        println!(
            "  {}. {} ({:.4}, {:.4})",
            idx + 1,
            place.label(),
            place.lat,
            place.lon
        );
    }
}
