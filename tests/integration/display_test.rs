// Integration tests for compositing and the control-loop handlers

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::layout::Rect;
use tablet_debug::core::source::{axis_code, button_code, tool_code};
use tablet_debug::core::{DeviceKey, Fixed, FieldUpdate, InputDevice, TabletContext};
use tablet_debug::platform::PendingSignal;
use tablet_debug::ui::tablet_tui::{
    apply_command, apply_keys, handle_device_events, handle_signal, initial_scan, Flow, TabletCommand,
    NO_DEVICES_WARNING,
};

use super::support::{added, removed, screen_rows, test_display, update, FakeDevice, ScriptedSource};

fn context(width: u16, height: u16) -> TabletContext<FakeDevice> {
    TabletContext::new(Rect::new(0, 0, width, height))
}

#[test]
fn test_placeholder_with_advisory_when_nothing_is_plugged_in() {
    let mut display = test_display(100, 24);
    let mut ctx = context(100, 24);
    let mut source = ScriptedSource::new();

    let stats = initial_scan(&mut ctx, &mut display, &mut source).unwrap();
    assert_eq!(stats.added, 0);

    let rows = screen_rows(&display);
    assert_eq!(rows[0], "There are no currently detected tablets.");
    assert!(rows[1].starts_with("Make sure your tablet is plugged in"));
    assert_eq!(rows[3], NO_DEVICES_WARNING);
    assert_eq!(rows[23].trim(), "q: Quit");
}

#[test]
fn test_startup_scan_shows_first_tablet() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![added(&tablet)]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[0], "System name: event12");
    assert_eq!(rows[1], "Stylus is touching tablet? False");
    assert_eq!(rows[3], "Current tool: None");
    assert_eq!(rows[5], "X:   0.000 Y:   0.000");
    assert_eq!(rows[7], "Vertical tilt: 0.000");
    assert_eq!(rows[8], "Horizontal tilt: 0.000");
    assert_eq!(rows[10], "Distance: 0.000");
    assert_eq!(rows[11], "Pressure: 0.000");
    assert!(rows[23].contains("Device 1/1"));
}

#[test]
fn test_field_updates_reach_the_screen_after_one_drain() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![added(&tablet)]).batch(vec![
        update(&tablet, FieldUpdate::ToolUpdate { tool: tool_code::AIRBRUSH }),
        update(
            &tablet,
            FieldUpdate::MotionAbsolute {
                x: Fixed::from_f64(468.75),
                y: Fixed::from_f64(250.0),
            },
        ),
        update(&tablet, FieldUpdate::Axis { axis: axis_code::TILT_VERTICAL, value: Fixed::from_f64(-10.0) }),
        update(&tablet, FieldUpdate::Axis { axis: axis_code::DISTANCE, value: Fixed::from_f64(0.125) }),
        update(&tablet, FieldUpdate::Button { button: button_code::BTN_TOUCH, pressed: true }),
    ]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();
    handle_device_events(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[1], "Stylus is touching tablet? True");
    assert_eq!(rows[3], "Current tool: Airbrush");
    assert_eq!(rows[5], "X: 468.750 Y: 250.000");
    assert_eq!(rows[7], "Vertical tilt: -10.000");
    assert_eq!(rows[8], "Horizontal tilt: 0.000");
    assert_eq!(rows[10], "Distance: 0.125");
    assert_eq!(rows[11], "Pressure: 0.000");
}

#[test]
fn test_unplugging_last_tablet_brings_back_placeholder() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(90, 24);
    let mut ctx = context(90, 24);
    let mut source = ScriptedSource::new()
        .batch(vec![added(&tablet)])
        .batch(vec![removed(&tablet)]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();
    handle_device_events(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[0], "There are no currently detected tablets.");
    assert_eq!(rows[5], "");
}

#[test]
fn test_arrow_keys_switch_between_tablets() {
    let first = FakeDevice::tablet(1, "event4");
    let second = FakeDevice::tablet(2, "event5");
    let third = FakeDevice::tablet(3, "event6");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![added(&first), added(&second), added(&third)]);
    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    // later tablets stack underneath, so the first one keeps focus
    assert_eq!(screen_rows(&display)[0], "System name: event4");

    apply_command(&mut ctx, &mut display, TabletCommand::NextDevice).unwrap();
    let rows = screen_rows(&display);
    assert_eq!(rows[0], "System name: event5");
    assert!(rows[23].contains("Device 1/3"));

    apply_command(&mut ctx, &mut display, TabletCommand::PreviousDevice).unwrap();
    apply_command(&mut ctx, &mut display, TabletCommand::PreviousDevice).unwrap();
    assert_eq!(screen_rows(&display)[0], "System name: event6");
    assert_eq!(ctx.focused_record().unwrap().device().key(), DeviceKey(3));
}

#[test]
fn test_cycling_with_only_the_placeholder_does_nothing() {
    let mut display = test_display(100, 24);
    let mut ctx = context(100, 24);

    for command in [TabletCommand::NextDevice, TabletCommand::PreviousDevice, TabletCommand::None] {
        assert_eq!(apply_command(&mut ctx, &mut display, command).unwrap(), Flow::Continue);
    }
    assert!(ctx.stack().placeholder_visible());
    assert_eq!(screen_rows(&display)[0], "There are no currently detected tablets.");
}

#[test]
fn test_quit_command_and_interrupt_end_the_loop() {
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);

    assert_eq!(apply_command(&mut ctx, &mut display, TabletCommand::Quit).unwrap(), Flow::Quit);
    assert_eq!(handle_signal(&mut ctx, &mut display, PendingSignal::Interrupt).unwrap(), Flow::Quit);
}

#[test]
fn test_resize_repaints_every_surface() {
    let first = FakeDevice::tablet(1, "event4");
    let second = FakeDevice::tablet(2, "event5");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![
        added(&first),
        added(&second),
        update(&second, FieldUpdate::Axis { axis: axis_code::PRESSURE, value: Fixed::from_f64(1.0) }),
    ]);
    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    display.backend_mut().resize(60, 30);
    let flow = handle_signal(&mut ctx, &mut display, PendingSignal::Resize).unwrap();
    assert_eq!(flow, Flow::Continue);

    let bigger = Rect::new(0, 0, 60, 30);
    assert_eq!(ctx.area(), bigger);
    assert_eq!(ctx.stack().placeholder().area(), bigger);
    let second_record = ctx.record(DeviceKey(2)).unwrap();
    assert_eq!(second_record.surface().area(), bigger);
    assert_eq!(second_record.surface().line(11), "Pressure: 1.000");

    let rows = screen_rows(&display);
    assert_eq!(rows.len(), 30);
    assert_eq!(rows[0], "System name: event4");
    assert!(rows[29].contains("Device 1/2"));
}

#[test]
fn test_advisory_is_gone_after_a_tablet_comes_and_goes() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(100, 24);
    let mut ctx = context(100, 24);
    let mut source = ScriptedSource::new()
        .batch(vec![])
        .batch(vec![added(&tablet)])
        .batch(vec![removed(&tablet)]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();
    assert_eq!(screen_rows(&display)[3], NO_DEVICES_WARNING);

    handle_device_events(&mut ctx, &mut display, &mut source).unwrap();
    handle_device_events(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[0], "There are no currently detected tablets.");
    assert_eq!(rows[3], "");
}

#[test]
fn test_footer_never_covers_the_pressure_line() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(80, 12);
    let mut ctx = context(80, 12);
    let mut source = ScriptedSource::new().batch(vec![added(&tablet)]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[11], "Pressure: 0.000");
    assert!(rows.iter().all(|row| !row.contains("q: Quit")));
}

#[test]
fn test_footer_goes_below_the_last_field() {
    let tablet = FakeDevice::tablet(1, "event12");
    let mut display = test_display(80, 13);
    let mut ctx = context(80, 13);
    let mut source = ScriptedSource::new().batch(vec![added(&tablet)]);

    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    let rows = screen_rows(&display);
    assert_eq!(rows[11], "Pressure: 0.000");
    assert!(rows[12].contains("Device 1/1"));
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn test_every_buffered_key_is_applied() {
    let first = FakeDevice::tablet(1, "event4");
    let second = FakeDevice::tablet(2, "event5");
    let third = FakeDevice::tablet(3, "event6");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![added(&first), added(&second), added(&third)]);
    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    let keys = [press(KeyCode::Right), press(KeyCode::Char('x')), press(KeyCode::Right)];
    assert_eq!(apply_keys(&mut ctx, &mut display, keys).unwrap(), Flow::Continue);

    assert_eq!(ctx.focused_record().unwrap().device().key(), DeviceKey(3));
    assert_eq!(screen_rows(&display)[0], "System name: event6");
}

#[test]
fn test_quit_key_stops_the_rest_of_the_batch() {
    let first = FakeDevice::tablet(1, "event4");
    let second = FakeDevice::tablet(2, "event5");
    let mut display = test_display(80, 24);
    let mut ctx = context(80, 24);
    let mut source = ScriptedSource::new().batch(vec![added(&first), added(&second)]);
    initial_scan(&mut ctx, &mut display, &mut source).unwrap();

    let keys = vec![press(KeyCode::Char('q')), press(KeyCode::Right)];
    assert_eq!(apply_keys(&mut ctx, &mut display, keys).unwrap(), Flow::Quit);
    assert_eq!(ctx.focused_record().unwrap().device().key(), DeviceKey(1));
}
