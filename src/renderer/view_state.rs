use winit::keyboard::{Key, NamedKey};

pub const ZOOM_STEP: f64 = 0.1;
pub const PAN_STEP: f64 = 0.1;

/// Space left around a window that is sized to its image. Images that don't fit
/// within the monitor minus this margin open maximized.
pub const SCREEN_MARGIN: u32 = 50;

/// Where the image lands on screen, in physical pixels with the origin at the
/// top-left corner of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FitToWindow,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    Center,
    Quit,
}

impl Command {
    pub fn from_key(key: &Key) -> Option<Self> {
        let command = match key {
            Key::Character(c) => match c.as_str() {
                "+" | "=" => Self::ZoomIn,
                "-" => Self::ZoomOut,
                "0" => Self::ResetZoom,
                "9" => Self::FitToWindow,
                "k" => Self::PanUp,
                "j" => Self::PanDown,
                "h" => Self::PanLeft,
                "l" => Self::PanRight,
                "c" => Self::Center,
                "q" => Self::Quit,
                _ => return None,
            },
            Key::Named(NamedKey::ArrowUp) => Self::PanUp,
            Key::Named(NamedKey::ArrowDown) => Self::PanDown,
            Key::Named(NamedKey::ArrowLeft) => Self::PanLeft,
            Key::Named(NamedKey::ArrowRight) => Self::PanRight,
            Key::Named(NamedKey::Escape) => Self::Quit,
            _ => return None,
        };

        Some(command)
    }
}

/// Zoom and pan of the displayed image.
///
/// `move_x` and `move_y` are fractions of the scaled image size, so panning
/// stays proportional when the zoom changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f64,
    move_x: f64,
    move_y: f64,
    fit_to_window: bool,
}

impl ViewState {
    pub const fn new(fit_to_window: bool) -> Self {
        Self {
            zoom: 1.0,
            move_x: 0.0,
            move_y: 0.0,
            fit_to_window,
        }
    }

    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    pub const fn offset(&self) -> (f64, f64) {
        (self.move_x, self.move_y)
    }

    pub const fn fit_to_window(&self) -> bool {
        self.fit_to_window
    }

    /// Applies a command. Returns `false` for `Quit`, which the caller handles.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ResetZoom => self.reset_zoom(),
            Command::FitToWindow => self.fit(),
            Command::PanUp => self.pan(0.0, -PAN_STEP),
            Command::PanDown => self.pan(0.0, PAN_STEP),
            Command::PanLeft => self.pan(-PAN_STEP, 0.0),
            Command::PanRight => self.pan(PAN_STEP, 0.0),
            Command::Center => self.center(),
            Command::Quit => return false,
        }

        true
    }

    pub fn zoom_in(&mut self) {
        self.fit_to_window = false;
        self.zoom += ZOOM_STEP;
    }

    // Stops at the last full step above zero, panning divides by the zoom.
    pub fn zoom_out(&mut self) {
        self.fit_to_window = false;

        if self.zoom - ZOOM_STEP >= ZOOM_STEP / 2.0 {
            self.zoom -= ZOOM_STEP;
        }
    }

    pub fn reset_zoom(&mut self) {
        self.fit_to_window = false;
        self.zoom = 1.0;
    }

    pub fn fit(&mut self) {
        self.fit_to_window = true;
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.move_x += delta_x / self.zoom;
        self.move_y += delta_y / self.zoom;
    }

    pub fn center(&mut self) {
        self.move_x = 0.0;
        self.move_y = 0.0;
    }

    /// Computes where the image is drawn inside a window of `screen` size.
    ///
    /// With fit-to-window on, the zoom is recomputed so the image never appears
    /// larger than the window. Images that already fit are shown at 100%.
    pub fn layout(&mut self, image: (u32, u32), screen: (u32, u32)) -> Rect {
        let (image_w, image_h) = (f64::from(image.0), f64::from(image.1));
        let (screen_w, screen_h) = (f64::from(screen.0), f64::from(screen.1));

        if self.fit_to_window {
            if screen_w < image_w || screen_h < image_h {
                self.zoom = screen_h / image_h;

                if screen_w < image_w * self.zoom {
                    self.zoom = screen_w / image_w;
                }
            } else {
                self.zoom = 1.0;
            }
        }

        let width = image_w * self.zoom;
        let height = image_h * self.zoom;

        Rect {
            x: (screen_w - width) / 2.0 - self.move_x * width,
            y: (screen_h - height) / 2.0 - self.move_y * height,
            width,
            height,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialWindow {
    Maximized,
    Sized(u32, u32),
}

/// Opens the window at the image size unless the image doesn't fit on the monitor.
pub fn initial_window(image: (u32, u32), monitor: Option<(u32, u32)>) -> InitialWindow {
    match monitor {
        Some((monitor_w, monitor_h))
            if image.0 >= monitor_w.saturating_sub(SCREEN_MARGIN)
                || image.1 >= monitor_h.saturating_sub(SCREEN_MARGIN) =>
        {
            InitialWindow::Maximized
        }
        _ => InitialWindow::Sized(image.0, image.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_small_image_is_centered_at_full_size() {
        let mut view = ViewState::default();
        let rect = view.layout((100, 50), (400, 300));

        assert_eq!(view.zoom(), 1.0);
        assert_eq!(
            rect,
            Rect {
                x: 150.0,
                y: 125.0,
                width: 100.0,
                height: 50.0,
            }
        );
    }

    #[test]
    fn test_fit_shrinks_tall_image_by_height() {
        let mut view = ViewState::default();
        let rect = view.layout((200, 800), (400, 400));

        assert_close(view.zoom(), 0.5);
        assert_close(rect.width, 100.0);
        assert_close(rect.height, 400.0);
        assert_close(rect.x, 150.0);
        assert_close(rect.y, 0.0);
    }

    #[test]
    fn test_fit_shrinks_wide_image_by_width() {
        let mut view = ViewState::default();
        let rect = view.layout((1000, 200), (500, 400));

        assert_close(view.zoom(), 0.5);
        assert_close(rect.width, 500.0);
        assert_close(rect.height, 100.0);
        assert_close(rect.y, 150.0);
    }

    #[test]
    fn test_manual_zoom_disables_fit() {
        let mut view = ViewState::default();
        view.layout((1000, 1000), (500, 500));
        assert_close(view.zoom(), 0.5);

        view.zoom_in();
        assert!(!view.fit_to_window());

        let rect = view.layout((1000, 1000), (500, 500));
        assert_close(view.zoom(), 0.6);
        assert_close(rect.width, 600.0);
        assert_close(rect.x, -50.0);

        view.fit();
        view.layout((1000, 1000), (500, 500));
        assert_close(view.zoom(), 0.5);
    }

    #[test]
    fn test_zoom_out_stays_positive() {
        let mut view = ViewState::new(false);

        for _ in 0..20 {
            view.zoom_out();
        }

        assert!(view.zoom() > 0.0);
        assert_close(view.zoom(), 0.1);
    }

    #[test]
    fn test_reset_zoom() {
        let mut view = ViewState::default();
        view.zoom_in();
        view.zoom_in();
        view.reset_zoom();

        assert_eq!(view.zoom(), 1.0);
        assert!(!view.fit_to_window());
    }

    #[test]
    fn test_pan_scales_with_zoom_and_centers() {
        let mut view = ViewState::new(false);
        view.zoom_in();
        view.apply(Command::PanRight);
        view.apply(Command::PanUp);

        let (move_x, move_y) = view.offset();
        assert_close(move_x, 0.1 / 1.1);
        assert_close(move_y, -0.1 / 1.1);

        let rect = view.layout((100, 100), (400, 400));
        assert_close(rect.x, (400.0 - 110.0) / 2.0 - move_x * 110.0);
        assert_close(rect.y, (400.0 - 110.0) / 2.0 - move_y * 110.0);

        view.apply(Command::Center);
        assert_eq!(view.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_quit_is_left_to_the_caller() {
        let mut view = ViewState::default();

        assert!(!view.apply(Command::Quit));
        assert!(view.apply(Command::ZoomIn));
    }

    #[test]
    fn test_key_bindings() {
        let cases = [
            (Key::Character("+".into()), Some(Command::ZoomIn)),
            (Key::Character("=".into()), Some(Command::ZoomIn)),
            (Key::Character("-".into()), Some(Command::ZoomOut)),
            (Key::Character("0".into()), Some(Command::ResetZoom)),
            (Key::Character("9".into()), Some(Command::FitToWindow)),
            (Key::Character("k".into()), Some(Command::PanUp)),
            (Key::Named(NamedKey::ArrowDown), Some(Command::PanDown)),
            (Key::Character("h".into()), Some(Command::PanLeft)),
            (Key::Named(NamedKey::ArrowRight), Some(Command::PanRight)),
            (Key::Character("c".into()), Some(Command::Center)),
            (Key::Character("q".into()), Some(Command::Quit)),
            (Key::Named(NamedKey::Escape), Some(Command::Quit)),
            (Key::Character("x".into()), None),
            (Key::Named(NamedKey::Enter), None),
        ];

        for (key, expected) in cases {
            assert_eq!(Command::from_key(&key), expected, "{key:?}");
        }
    }

    #[test]
    fn test_initial_window() {
        assert_eq!(
            initial_window((640, 480), Some((1920, 1080))),
            InitialWindow::Sized(640, 480)
        );
        assert_eq!(
            initial_window((1900, 480), Some((1920, 1080))),
            InitialWindow::Maximized
        );
        assert_eq!(
            initial_window((640, 1030), Some((1920, 1080))),
            InitialWindow::Maximized
        );
        assert_eq!(
            initial_window((4000, 4000), None),
            InitialWindow::Sized(4000, 4000)
        );
    }
}
