use std::cell::RefCell;
use std::rc::Rc;

use trellis_canvas::DrawScope;
use trellis_core::{
    Color, InputEvent, Key, KeyEvent, MemoryClipboard, Modifiers, PointerButton, Services,
    StyleBag, Theme, UiConfig, UiError, Vec2,
};
use trellis_ui::{
    ChatBox, ChatBoxOptions, Checkbox, CheckboxOptions, Column, ElementOptions, NodeId, Slider,
    SliderOptions, Table, TableOptions, TextBox, TextBoxOptions, Ui,
};

fn ui_with(services: Services) -> Ui {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = UiConfig {
        buffer: 1.0,
        ..Default::default()
    };
    Ui::new(config, services).unwrap()
}

fn ui() -> Ui {
    ui_with(Services::default())
}

fn point(ui: &mut Ui, x: f32, y: f32) {
    ui.handle_input(InputEvent::PointerMove {
        position: Vec2::new(x, y),
    });
    ui.update();
}

fn press(ui: &mut Ui) {
    ui.handle_input(InputEvent::PointerDown {
        button: PointerButton::Primary,
    });
}

fn release(ui: &mut Ui) {
    ui.handle_input(InputEvent::PointerUp {
        button: PointerButton::Primary,
    });
}

fn click(ui: &mut Ui) {
    press(ui);
    release(ui);
}

fn type_text(ui: &mut Ui, text: &str) {
    for c in text.chars() {
        ui.handle_input(InputEvent::KeyTyped(KeyEvent::char(c)));
    }
}

fn type_key(ui: &mut Ui, key: Key, modifiers: Modifiers) {
    ui.handle_input(InputEvent::KeyTyped(KeyEvent::new(key, modifiers)));
}

fn table_screen(ui: &mut Ui, options: TableOptions<u32>) -> NodeId {
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    ui.add_table(screen, options).unwrap()
}

fn numbers() -> TableOptions<u32> {
    TableOptions::default().column(Column::new("Number", |n: &u32| n.to_string()))
}

#[test]
fn test_table_scroll_clamps_to_last_page() {
    let mut ui = ui();
    let table = table_screen(
        &mut ui,
        TableOptions {
            scrollbar_width: 10.0,
            ..numbers()
        },
    );
    let table = ui.widget_mut::<Table<u32>>(table).unwrap();
    for n in 0..20 {
        table.add_item(n);
    }
    assert_eq!(table.max_rows(), 10);

    table.scroll_by(15);
    assert_eq!(table.display_start(), 10);
    assert_eq!(table.scrollbar().unwrap().thumb_size(), 0.5);
}

#[test]
fn test_table_wheel_needs_hover() {
    let mut ui = ui();
    let id = table_screen(
        &mut ui,
        TableOptions {
            element: ElementOptions::at(50.0, 100.0),
            scrollbar_width: 10.0,
            ..numbers()
        },
    );
    for n in 0..20 {
        ui.widget_mut::<Table<u32>>(id).unwrap().add_item(n);
    }

    point(&mut ui, 10.0, 10.0);
    ui.handle_input(InputEvent::Wheel {
        delta: Vec2::new(0.0, 300.0),
    });
    assert_eq!(ui.widget::<Table<u32>>(id).unwrap().display_start(), 0);

    point(&mut ui, 200.0, 200.0);
    ui.handle_input(InputEvent::Wheel {
        delta: Vec2::new(0.0, 300.0),
    });
    assert_eq!(ui.widget::<Table<u32>>(id).unwrap().display_start(), 3);
}

#[test]
fn test_table_row_click_commit() {
    let mut ui = ui();
    let clicked = Rc::new(RefCell::new(Vec::new()));
    let sink = clicked.clone();
    let id = table_screen(
        &mut ui,
        TableOptions {
            element: ElementOptions::at(50.0, 100.0),
            ..numbers().on_click(move |n: &u32, _| sink.borrow_mut().push(*n))
        },
    );
    for n in [10, 11, 12, 13, 14] {
        ui.widget_mut::<Table<u32>>(id).unwrap().add_item(n);
    }

    // Rows are 30 high; the third row spans y 160..190.
    point(&mut ui, 100.0, 175.0);
    assert_eq!(ui.widget::<Table<u32>>(id).unwrap().hovered_row(), Some(2));
    click(&mut ui);
    assert_eq!(*clicked.borrow(), vec![12]);

    point(&mut ui, 100.0, 145.0);
    press(&mut ui);
    point(&mut ui, 100.0, 205.0);
    release(&mut ui);
    assert_eq!(*clicked.borrow(), vec![12]);

    // Below the last row.
    point(&mut ui, 100.0, 300.0);
    click(&mut ui);
    assert_eq!(*clicked.borrow(), vec![12]);
}

#[test]
fn test_table_without_columns_is_not_inserted() {
    let mut ui = ui();
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    let before = ui.tree().len();
    let result = ui.add_table::<u32>(screen, TableOptions::default());
    assert!(matches!(result, Err(UiError::TableWithoutColumns)));
    assert_eq!(ui.tree().len(), before);
    assert!(ui.tree().children(screen).is_empty());
}

fn field(ui: &mut Ui, options: TextBoxOptions) -> NodeId {
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    let id = ui
        .add_textbox(
            screen,
            TextBoxOptions {
                element: ElementOptions::at(100.0, 300.0),
                ..options
            },
        )
        .unwrap();
    point(ui, 150.0, 290.0);
    click(ui);
    id
}

fn value(ui: &Ui, id: NodeId) -> String {
    ui.widget::<TextBox>(id).unwrap().value().to_string()
}

#[test]
fn test_text_box_typing_and_cursor_keys() {
    let mut ui = ui();
    let id = field(&mut ui, TextBoxOptions::default());
    assert!(ui.widget::<TextBox>(id).unwrap().is_focused());

    type_text(&mut ui, "hello world");
    ui.update();
    assert_eq!(value(&ui, id), "hello world");

    type_key(&mut ui, Key::Home, Modifiers::NONE);
    for _ in 0..5 {
        type_key(&mut ui, Key::ArrowRight, Modifiers::NONE);
    }
    type_text(&mut ui, " there");
    ui.update();
    assert_eq!(value(&ui, id), "hello there world");

    type_key(&mut ui, Key::ArrowLeft, Modifiers::CTRL_SHIFT);
    type_key(&mut ui, Key::Backspace, Modifiers::NONE);
    ui.update();
    assert_eq!(value(&ui, id), "hello  world");
}

#[test]
fn test_text_box_submit_clears_and_blurs() {
    let mut ui = ui();
    let submitted = Rc::new(RefCell::new(Vec::new()));
    let sink = submitted.clone();
    let id = field(
        &mut ui,
        TextBoxOptions::default().on_submit(move |text, _| sink.borrow_mut().push(text.to_string())),
    );

    type_text(&mut ui, "hi");
    type_key(&mut ui, Key::Enter, Modifiers::NONE);
    type_text(&mut ui, "lost");
    ui.update();
    assert_eq!(*submitted.borrow(), vec!["hi"]);
    assert_eq!(value(&ui, id), "");
    assert!(!ui.widget::<TextBox>(id).unwrap().is_focused());

    // Keys typed while unfocused are ignored.
    type_text(&mut ui, "ignored");
    ui.update();
    assert_eq!(value(&ui, id), "");

    point(&mut ui, 150.0, 290.0);
    click(&mut ui);
    type_key(&mut ui, Key::Enter, Modifiers::NONE);
    ui.update();
    assert_eq!(submitted.borrow().len(), 1);
}

#[test]
fn test_paste_pauses_key_processing() {
    let clipboard = MemoryClipboard::deferred();
    clipboard.set_contents("pasted\ntext");
    let mut ui = ui_with(Services::default().with_clipboard(clipboard.clone()));
    let id = field(&mut ui, TextBoxOptions::default());

    type_text(&mut ui, "ab");
    type_key(&mut ui, Key::Character('v'), Modifiers::CTRL);
    type_text(&mut ui, "c");
    ui.update();
    assert_eq!(value(&ui, id), "ab");
    assert!(ui.widget::<TextBox>(id).unwrap().is_pasting());
    assert_eq!(ui.widget::<TextBox>(id).unwrap().queued_keys(), 1);

    type_text(&mut ui, "d");
    ui.update();
    assert_eq!(value(&ui, id), "ab");
    assert_eq!(clipboard.pending_reads(), 1);

    clipboard.complete_reads();
    ui.update();
    assert_eq!(value(&ui, id), "abpasted textcd");
    assert!(!ui.widget::<TextBox>(id).unwrap().is_pasting());
}

#[test]
fn test_paste_after_refocus_is_dropped() {
    let clipboard = MemoryClipboard::deferred();
    clipboard.set_contents("late");
    let mut ui = ui_with(Services::default().with_clipboard(clipboard.clone()));
    let id = field(&mut ui, TextBoxOptions::default());

    type_key(&mut ui, Key::Character('v'), Modifiers::CTRL);
    ui.update();
    assert!(ui.widget::<TextBox>(id).unwrap().is_pasting());

    point(&mut ui, 800.0, 100.0);
    click(&mut ui);
    assert!(!ui.widget::<TextBox>(id).unwrap().is_focused());
    point(&mut ui, 150.0, 290.0);
    click(&mut ui);
    assert!(ui.widget::<TextBox>(id).unwrap().is_focused());

    clipboard.complete_reads();
    ui.update();
    assert_eq!(value(&ui, id), "");
    assert!(!ui.widget::<TextBox>(id).unwrap().is_pasting());
}

#[test]
fn test_drag_select_scrolls_past_right_edge() {
    let mut ui = ui();
    let id = field(
        &mut ui,
        TextBoxOptions {
            width: 60.0,
            value: "abcdefghijklmnopqrstuvwxyz".to_string(),
            ..Default::default()
        },
    );
    type_key(&mut ui, Key::Home, Modifiers::NONE);
    ui.update();

    point(&mut ui, 105.0, 290.0);
    press(&mut ui);
    let start = ui.widget::<TextBox>(id).unwrap().edit().cursor();
    assert_eq!(start, 0);

    // Every drag_scroll_interval ticks the cursor steps one past the window.
    for _ in 0..200 {
        point(&mut ui, 400.0, 290.0);
    }
    let edit = ui.widget::<TextBox>(id).unwrap().edit();
    assert_eq!(edit.anchor(), start);
    assert_eq!(edit.cursor(), edit.len());
    assert_eq!(edit.window().end, 26);
    assert_eq!(edit.selected_text(), "abcdefghijklmnopqrstuvwxyz");

    release(&mut ui);
    point(&mut ui, 105.0, 290.0);
    assert_eq!(ui.widget::<TextBox>(id).unwrap().edit().cursor(), 26);
}

#[test]
fn test_refocus_types_while_old_paste_is_pending() {
    let clipboard = MemoryClipboard::deferred();
    clipboard.set_contents("late");
    let mut ui = ui_with(Services::default().with_clipboard(clipboard.clone()));
    let id = field(&mut ui, TextBoxOptions::default());

    type_key(&mut ui, Key::Character('v'), Modifiers::CTRL);
    ui.update();
    point(&mut ui, 800.0, 100.0);
    click(&mut ui);
    point(&mut ui, 150.0, 290.0);
    click(&mut ui);
    assert!(!ui.widget::<TextBox>(id).unwrap().is_pasting());

    type_text(&mut ui, "x");
    ui.update();
    assert_eq!(value(&ui, id), "x");
}

#[test]
fn test_failed_paste_resumes_typing() {
    let clipboard = MemoryClipboard::deferred();
    let mut ui = ui_with(Services::default().with_clipboard(clipboard.clone()));
    let id = field(&mut ui, TextBoxOptions::default());

    type_key(&mut ui, Key::Character('v'), Modifiers::CTRL);
    type_text(&mut ui, "x");
    ui.update();
    clipboard.fail_reads();
    ui.update();
    assert_eq!(value(&ui, id), "x");
}

#[test]
fn test_copy_and_cut_write_the_clipboard() {
    let clipboard = MemoryClipboard::new();
    let mut ui = ui_with(Services::default().with_clipboard(clipboard.clone()));
    let id = field(&mut ui, TextBoxOptions::default());

    type_text(&mut ui, "copy me");
    type_key(&mut ui, Key::Character('c'), Modifiers::CTRL);
    ui.update();
    assert_eq!(clipboard.contents(), "copy me");

    type_key(&mut ui, Key::Character('a'), Modifiers::CTRL);
    type_key(&mut ui, Key::Character('x'), Modifiers::CTRL);
    ui.update();
    assert_eq!(clipboard.contents(), "copy me");
    assert_eq!(value(&ui, id), "");
}

#[test]
fn test_checkbox_toggles_on_press() {
    let mut ui = ui();
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = ui
        .add_checkbox(
            screen,
            CheckboxOptions {
                element: ElementOptions::at(100.0, 100.0),
                ..Default::default()
            }
            .on_click(move |value, _| sink.borrow_mut().push(value)),
        )
        .unwrap();

    point(&mut ui, 100.0, 100.0);
    click(&mut ui);
    click(&mut ui);
    assert_eq!(*seen.borrow(), vec![true, false]);
    assert!(!ui.widget::<Checkbox>(id).unwrap().value());

    point(&mut ui, 300.0, 100.0);
    click(&mut ui);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_slider_drag_snaps_and_releases() {
    let mut ui = ui();
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    let moves = Rc::new(RefCell::new(Vec::new()));
    let released = Rc::new(RefCell::new(None));
    let (move_sink, release_sink) = (moves.clone(), released.clone());
    let id = ui
        .add_slider(
            screen,
            SliderOptions {
                element: ElementOptions::at(450.0, 300.0),
                max: 10.0,
                ..Default::default()
            }
            .on_move(move |v, _| move_sink.borrow_mut().push(v))
            .on_release(move |v, _| *release_sink.borrow_mut() = Some(v)),
        )
        .unwrap();
    assert_eq!(ui.widget::<Slider>(id).unwrap().value(), 5.0);

    point(&mut ui, 450.0, 300.0);
    press(&mut ui);
    point(&mut ui, 525.0, 300.0);
    point(&mut ui, 2000.0, 300.0);
    release(&mut ui);

    assert_eq!(*moves.borrow(), vec![8.0, 10.0]);
    assert_eq!(*released.borrow(), Some(10.0));
    assert!(!ui.widget::<Slider>(id).unwrap().is_dragging());
}

#[test]
fn test_chat_box_draws_newest_line_at_the_bottom() {
    let mut ui = ui();
    ui.add_theme(
        "chat",
        Theme::new().with_style(
            "chatbox",
            "default",
            StyleBag::new()
                .colour("text", Color::BLACK)
                .modifier("bold", StyleBag::new().colour("text", Color::from_rgb(200, 0, 0))),
        ),
        true,
    );
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    let id = ui
        .add_chatbox(
            screen,
            ChatBoxOptions {
                element: ElementOptions::at(0.0, 600.0),
                ..Default::default()
            },
        )
        .unwrap();
    ui.measured_mut::<ChatBox, _>(id, |chat, m| {
        chat.add_text("welcome", true, m);
        chat.add_text("hi there", false, m);
    })
    .unwrap();

    let mut scope = DrawScope::default();
    ui.draw(&mut scope);
    insta::assert_debug_snapshot!(scope.texts(), @r#"
    [
        "hi there",
        "welcome",
    ]
    "#);
}

#[test]
fn test_text_box_draw() {
    let mut ui = ui();
    ui.add_theme(
        "form",
        Theme::new().with_style(
            "textbox",
            "default",
            StyleBag::new()
                .colour("fill", Color::WHITE)
                .colour("text", Color::BLACK)
                .colour("default", Color::gray(150)),
        ),
        true,
    );
    let screen = ui.add_screen("main", ElementOptions::default()).unwrap();
    ui.set_screen("main");
    ui.add_textbox(
        screen,
        TextBoxOptions {
            element: ElementOptions::at(100.0, 300.0),
            placeholder: "Name".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let mut scope = DrawScope::default();
    ui.draw(&mut scope);
    insta::assert_debug_snapshot!(scope.commands, @r#"
    [
        Clear,
        Rect {
            rect: Rect {
                x: 100.0,
                y: 275.0,
                w: 400.0,
                h: 25.0,
            },
            fill: Some(
                Color(
                    255,
                    255,
                    255,
                    255,
                ),
            ),
            stroke: None,
        },
        Text {
            text: "Name",
            pos: Vec2 {
                x: 105.0,
                y: 292.5,
            },
            size: 15.0,
            align: Left,
            color: Color(
                150,
                150,
                150,
                255,
            ),
        },
    ]
    "#);
}
