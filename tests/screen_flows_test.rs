use gymdash::forms::{
    FieldStatus, FieldValue, FileUpload, FormListener, FormStateController, FormValues, Locale,
    SubmitOutcome,
};
use gymdash::screens::{self, Screen};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Events {
    changes: usize,
    submitted: Option<FormValues>,
    cancelled: bool,
}

struct Page(Rc<RefCell<Events>>);

impl FormListener for Page {
    fn on_form_data_change(&mut self, _values: &FormValues) {
        self.0.borrow_mut().changes += 1;
    }

    fn on_submit(&mut self, values: &FormValues) {
        self.0.borrow_mut().submitted = Some(values.clone());
    }

    fn on_cancel(&mut self) {
        self.0.borrow_mut().cancelled = true;
    }
}

fn open(screen: Screen) -> (FormStateController, Rc<RefCell<Events>>) {
    let events = Rc::new(RefCell::new(Events::default()));
    let form = FormStateController::new(screen.schema(), FormValues::new())
        .unwrap()
        .with_listener(Page(events.clone()));
    (form, events)
}

#[test]
fn test_new_member_flow() {
    let (mut form, events) = open(Screen::Members);

    // Nothing is shown before the user interacts
    assert!(form.visible_errors().is_empty());
    assert_eq!(form.field_status("email"), FieldStatus::Neutral);

    form.set_field_value("email", FieldValue::text("not-an-email")).unwrap();
    form.set_field_touched("email").unwrap();
    assert_eq!(form.field_status("email"), FieldStatus::Invalid);

    form.set_field_value("email", FieldValue::text("sara@gym.example")).unwrap();
    assert_eq!(form.field_status("email"), FieldStatus::Valid);

    assert!(!form.submit().is_submitted());
    assert!(events.borrow().submitted.is_none());

    form.set_field_value("name", FieldValue::text("Sara Ali")).unwrap();
    form.set_field_value("phone", FieldValue::text("+971501234567")).unwrap();
    form.set_field_value("gender", FieldValue::text("female")).unwrap();
    form.set_field_value("planId", FieldValue::text("plan-gold")).unwrap();
    form.set_field_value("weight", FieldValue::text("61.5")).unwrap();

    let outcome = form.submit();
    assert!(outcome.is_submitted(), "{:?}", outcome);
    let events = events.borrow();
    let submitted = events.submitted.as_ref().unwrap();
    assert_eq!(submitted["planId"], FieldValue::text("plan-gold"));
    assert_eq!(submitted["active"], FieldValue::Bool(false));
    assert_eq!(events.changes, 7);
}

#[test]
fn test_member_photo_must_be_an_allowed_image() {
    let (mut form, _) = open(Screen::Members);

    let pdf = FileUpload::new("scan.pdf", "application/pdf", vec![0; 128]);
    assert!(!form.set_field_file("avatar", pdf).unwrap());
    assert!(form.visible_error("avatar").is_some());
    assert!(form.preview("avatar").is_none());

    let huge = FileUpload::new("big.png", "image/png", vec![0; 2 * 1024 * 1024]);
    assert!(!form.set_field_file("avatar", huge).unwrap());
    assert!(form.visible_error("avatar").unwrap().contains("1MB"));

    let photo = FileUpload::new("me.png", "image/png", vec![137, 80, 78, 71]);
    assert!(form.set_field_file("avatar", photo).unwrap());
    assert!(form.visible_error("avatar").is_none());
    assert!(form.preview("avatar").unwrap().starts_with("data:image/png;base64,"));

    form.remove_field_file("avatar").unwrap();
    assert!(form.preview("avatar").is_none());
    assert_eq!(form.value("avatar"), Some(&FieldValue::Null));
}

#[test]
fn test_exercise_needs_exactly_the_selected_measure() {
    let (mut form, _) = open(Screen::Exercises);
    form.set_field_value("nameEn", FieldValue::text("Plank")).unwrap();
    form.set_field_value("nameAr", FieldValue::text("بلانك")).unwrap();
    form.set_field_value("categoryId", FieldValue::text("core")).unwrap();

    form.set_field_value("mode", FieldValue::text("duration")).unwrap();
    assert!(form.is_required("duration"));
    assert!(!form.is_required("repetitions"));

    let errors = match form.submit() {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["duration"]);

    // Switching the mode moves the requirement and re-checks both fields
    form.set_field_value("mode", FieldValue::text("count")).unwrap();
    assert!(form.visible_error("duration").is_none());
    assert!(form.visible_error("repetitions").is_some());

    form.set_field_value("repetitions", FieldValue::text("20")).unwrap();
    assert!(form.submit().is_submitted());
}

#[test]
fn test_meal_items_flow() {
    let (mut form, events) = open(Screen::Meals);
    form.set_field_value("nameEn", FieldValue::text("Greek salad")).unwrap();
    form.set_field_value("nameAr", FieldValue::text("سلطة يونانية")).unwrap();
    form.set_field_value("type", FieldValue::text("lunch")).unwrap();
    form.set_field_value("calories", FieldValue::text("320")).unwrap();

    // The list starts with one blank item that cannot be removed
    assert!(!form.remove_group_item("mealItems", 0).unwrap());

    form.update_group_item("mealItems", 0, Locale::Primary, "Feta").unwrap();
    form.update_group_item("mealItems", 0, Locale::Secondary, "جبنة فيتا").unwrap();
    form.add_group_item("mealItems").unwrap();
    form.update_group_item("mealItems", 1, Locale::Primary, "Olives").unwrap();

    let errors = match form.submit() {
        SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "mealItems[1].description.ar");

    assert!(form.remove_group_item("mealItems", 1).unwrap());
    assert!(form.submit().is_submitted());

    let submitted = events.borrow().submitted.clone().unwrap();
    let json = serde_json::to_value(&submitted["mealItems"]).unwrap();
    assert_eq!(json[0]["description"]["en"], "Feta");
    assert_eq!(json[0]["description"]["ar"], "جبنة فيتا");
}

#[test]
fn test_cancel_and_reset() {
    let (mut form, events) = open(Screen::Categories);
    form.set_field_value("nameEn", FieldValue::text("x")).unwrap();
    form.set_field_touched("nameEn").unwrap();
    assert!(form.has_changes());
    assert!(form.visible_error("nameEn").is_some());

    form.cancel();
    assert!(events.borrow().cancelled);
    assert!(events.borrow().submitted.is_none());

    form.reset();
    assert!(!form.has_changes());
    assert!(form.visible_errors().is_empty());
    assert!(form.touched().is_empty());
}

#[test]
fn test_every_screen_starts_clean() {
    for screen in screens::ALL {
        let form = FormStateController::new(screen.schema(), FormValues::new()).unwrap();
        assert!(!form.has_changes(), "{}", screen.name());
        assert!(form.errors().is_empty(), "{}", screen.name());
        assert!(!form.show_all_errors(), "{}", screen.name());
    }
}
