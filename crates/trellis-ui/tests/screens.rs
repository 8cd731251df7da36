use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{
    Color, InputEvent, PointerButton, Services, StyleBag, Theme, UiConfig, Vec2,
};
use trellis_ui::{
    ButtonOptions, ElementOptions, Hooks, OverlayOptions, TextBox, TextBoxOptions, Ui,
};

type Log = Rc<RefCell<Vec<String>>>;

fn ui() -> Ui {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = UiConfig {
        buffer: 1.0,
        ..Default::default()
    };
    Ui::new(config, Services::default()).unwrap()
}

fn point(ui: &mut Ui, x: f32, y: f32) {
    ui.handle_input(InputEvent::PointerMove {
        position: Vec2::new(x, y),
    });
    ui.update();
}

fn click(ui: &mut Ui) {
    ui.handle_input(InputEvent::PointerDown {
        button: PointerButton::Primary,
    });
    ui.handle_input(InputEvent::PointerUp {
        button: PointerButton::Primary,
    });
}

fn logging(log: &Log, name: &'static str) -> ElementOptions {
    let log = log.clone();
    ElementOptions::default().hooks(Hooks::default().on_change_screen(move |change, _| {
        let what = if change.leaving { "leaving" } else { "entering" };
        log.borrow_mut().push(format!("{name} {what}"));
    }))
}

fn lobby_with_password(log: &Log) -> Ui {
    let mut ui = ui();
    ui.add_screen("lobby", logging(log, "lobby")).unwrap();
    let display_log = log.clone();
    ui.add_overlay(
        "password",
        OverlayOptions {
            element: logging(log, "password"),
            title: "Password".to_string(),
            on_display: Some(Rc::new(move |_ui: &mut Ui, payload: &dyn std::any::Any| {
                let room = payload.downcast_ref::<String>().cloned().unwrap_or_default();
                display_log.borrow_mut().push(format!("display {room}"));
            })),
            ..Default::default()
        },
    )
    .unwrap();
    ui
}

#[test]
fn test_overlay_transition_order() {
    let log = Log::default();
    let mut ui = lobby_with_password(&log);
    assert!(ui.set_screen("lobby"));
    assert_eq!(*log.borrow(), vec!["lobby entering"]);
    log.borrow_mut().clear();

    assert!(ui.open_overlay("password", "room 7".to_string()));
    assert_eq!(
        *log.borrow(),
        vec!["lobby leaving", "password entering", "display room 7"]
    );
    assert_eq!(ui.active_screen(), ui.screen("password"));
    assert_eq!(ui.current_screen(), ui.screen("lobby"));
    log.borrow_mut().clear();

    assert!(ui.close_overlay());
    assert_eq!(*log.borrow(), vec!["password leaving", "lobby entering"]);
    assert_eq!(ui.active_screen(), ui.screen("lobby"));
    assert!(!ui.close_overlay());
}

#[test]
fn test_unknown_or_mismatched_names_are_ignored() {
    let log = Log::default();
    let mut ui = lobby_with_password(&log);
    ui.set_screen("lobby");
    log.borrow_mut().clear();

    assert!(!ui.set_screen("nowhere"));
    assert!(!ui.set_screen("password"));
    assert!(!ui.open_overlay("lobby", ()));
    assert!(!ui.open_overlay("nowhere", ()));
    assert!(log.borrow().is_empty());
    assert_eq!(ui.active_screen(), ui.screen("lobby"));
}

#[test]
fn test_close_button_closes_overlay() {
    let log = Log::default();
    let mut ui = lobby_with_password(&log);
    ui.set_screen("lobby");
    ui.open_overlay("password", String::new());

    // 450x300 overlay centred at (225, 150); the 20px close button sits in
    // the 30px header at the right edge.
    point(&mut ui, 225.0 + 435.0, 150.0 - 15.0);
    click(&mut ui);
    assert_eq!(ui.active_screen(), ui.screen("lobby"));
}

#[test]
fn test_commands_apply_after_the_flood() {
    let log = Log::default();
    let mut ui = lobby_with_password(&log);
    let lobby = ui.screen("lobby").unwrap();
    ui.add_button(
        lobby,
        ButtonOptions {
            element: ElementOptions::at(100.0, 100.0),
            ..Default::default()
        }
        .on_click(|cx| cx.commands().open_overlay("password", "from button".to_string())),
    )
    .unwrap();
    ui.set_screen("lobby");
    log.borrow_mut().clear();

    point(&mut ui, 100.0, 100.0);
    click(&mut ui);
    assert_eq!(ui.active_screen(), ui.screen("password"));
    assert_eq!(log.borrow().last().map(String::as_str), Some("display from button"));
}

#[test]
fn test_leaving_screen_blurs_text_box() {
    let mut ui = ui();
    let lobby = ui.add_screen("lobby", ElementOptions::default()).unwrap();
    ui.add_screen("game", ElementOptions::default()).unwrap();
    let blurred = Rc::new(RefCell::new(0));
    let counter = blurred.clone();
    let field = ui
        .add_textbox(
            lobby,
            TextBoxOptions {
                element: ElementOptions::at(100.0, 300.0),
                ..Default::default()
            }
            .on_blur(move |_| *counter.borrow_mut() += 1),
        )
        .unwrap();
    ui.set_screen("lobby");

    point(&mut ui, 150.0, 290.0);
    click(&mut ui);
    assert!(ui.widget::<TextBox>(field).unwrap().is_focused());

    ui.set_screen("game");
    assert!(!ui.widget::<TextBox>(field).unwrap().is_focused());
    assert_eq!(*blurred.borrow(), 1);
}

#[test]
fn test_theme_switch_restyles_every_root() {
    let mut ui = ui();
    let lobby = ui.add_screen("lobby", ElementOptions::default()).unwrap();
    let button = ui.add_button(lobby, ButtonOptions::default()).unwrap();
    let overlay = ui.add_overlay("help", OverlayOptions::default()).unwrap();
    assert!(!ui.tree().style(button).unwrap().is_resolved());

    let themed = |fill: Color| {
        Theme::new()
            .with_style("button", "default", StyleBag::new().colour("fill", fill))
            .with_style("overlay", "default", StyleBag::new().colour("fill", fill))
    };
    ui.add_theme("light", themed(Color::WHITE), false);
    assert_eq!(ui.theme_name(), "default");
    assert_eq!(ui.tree().style(button).unwrap().colour("fill"), None);

    ui.add_theme("dark", themed(Color::BLACK), true);
    assert_eq!(ui.tree().style(button).unwrap().colour("fill"), Some(Color::BLACK));
    assert_eq!(ui.tree().style(overlay).unwrap().colour("fill"), Some(Color::BLACK));

    assert!(ui.set_theme("light"));
    assert_eq!(ui.tree().style(button).unwrap().colour("fill"), Some(Color::WHITE));

    assert!(!ui.set_theme("neon"));
    assert_eq!(ui.theme_name(), "light");
}

#[test]
fn test_explicit_style_names_cascade() {
    let mut ui = ui();
    ui.add_theme(
        "main",
        Theme::new()
            .with_style("container", "danger", StyleBag::new())
            .with_style("button", "default", StyleBag::new().colour("fill", Color::WHITE))
            .with_style("button", "danger", StyleBag::new().colour("fill", Color::from_rgb(200, 0, 0))),
        true,
    );
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    let panel = ui
        .add_container(
            screen,
            trellis_ui::ContainerOptions {
                element: ElementOptions::default().style("danger"),
                ..Default::default()
            },
        )
        .unwrap();
    let inner = ui.add_button(panel, ButtonOptions::default()).unwrap();
    let outer = ui.add_button(screen, ButtonOptions::default()).unwrap();

    assert_eq!(
        ui.tree().style(inner).unwrap().colour("fill"),
        Some(Color::from_rgb(200, 0, 0))
    );
    assert_eq!(ui.tree().style(outer).unwrap().colour("fill"), Some(Color::WHITE));
}
