//! Screen controllers against the recorded fake gateway: list mechanics,
//! filters, forms, and the single-level screens.

mod common;

use serde_json::json;

use common::{
    Canned, FakeGateway, category_json, fail, ok_ambiguous, ok_confirmed, page_of,
};
use leximon_admin::api::ApiGateway;
use leximon_admin::model::entity::{Category, PaymentStatus};
use leximon_admin::notice::{NoticeLevel, Notices};
use leximon_admin::screen::{
    CategoryFilter, CategoryScreen, DashboardScreen, ImageUpload, ItemScreen, LevelRangeScreen,
    ListController, NoFilter, OrderFilter, OrderScreen,
};

fn cats(names: &[&str]) -> Vec<serde_json::Value> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| category_json(&format!("cat-{i}"), n))
        .collect()
}

// Scenario: create a category, watch it come back on page 1.
#[tokio::test]
async fn category_create_reloads_page_one_with_the_new_row() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = CategoryScreen::new();

    api.queue(page_of(cats(&["Food"]), 1, 1));
    screen.load(&api, &notices).await;
    assert_eq!(screen.list().items().len(), 1);

    screen.form_mut().open_create();
    screen.form_mut().set_name("Animals");

    api.queue(Canned::Ok {
        message: Some("Thêm danh mục thành công".into()),
        data: None,
        confirmed: true,
    });
    api.queue(page_of(cats(&["Animals", "Food"]), 1, 2));

    assert!(screen.submit_form(&api, &notices).await);
    assert!(!screen.form().is_open());
    assert_eq!(screen.list().current_page(), 1);
    assert!(screen.list().items().iter().any(|c| c.name() == "Animals"));

    let drained = notices.drain();
    assert_eq!(drained[0].level, NoticeLevel::Success);
    assert_eq!(drained[0].text, "Thêm danh mục thành công");

    let calls = api.calls();
    assert_eq!(calls[1].method, "POST");
    assert_eq!(calls[1].path, "/categories");
    assert_eq!(calls[1].body.as_ref().unwrap(), &json!({ "name": "Animals" }));
}

#[tokio::test]
async fn invalid_category_never_reaches_the_network() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = CategoryScreen::new();

    screen.form_mut().open_create();
    screen.form_mut().set_name("a");

    assert!(!screen.submit_form(&api, &notices).await);
    assert!(api.calls().is_empty());
    assert_eq!(
        screen.form().errors().get("name"),
        "Tên danh mục phải có ít nhất 2 ký tự"
    );
    assert!(screen.form().is_open());
}

// Round-trip: edit without touching a field submits the entity's own values.
#[tokio::test]
async fn unmodified_edit_submits_the_original_fields() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = CategoryScreen::new();

    let entity: Category = serde_json::from_value(category_json("cat-7", "Plants")).unwrap();
    screen.form_mut().open_edit(&entity);

    api.queue(ok_confirmed());
    api.queue(page_of(cats(&["Plants"]), 1, 1));
    assert!(screen.submit_form(&api, &notices).await);

    let calls = api.calls();
    assert_eq!(calls[0].method, "PUT");
    assert_eq!(calls[0].path, "/categories/cat-7");
    assert_eq!(calls[0].body.as_ref().unwrap(), &json!({ "name": "Plants" }));
    // edit reloads the page the user was on, not page 1 of a fresh list
    assert_eq!(calls[1].method, "GET");
}

#[tokio::test]
async fn out_of_range_page_changes_are_noops() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut list: ListController<Category, NoFilter> = ListController::new("/categories", 10);

    api.queue(page_of(cats(&["A"]), 3, 25));
    list.load(&api, &notices, 1).await;
    assert_eq!(api.calls().len(), 1);

    // below range, above range, and the current page itself
    assert!(!list.change_page(&api, &notices, 0).await);
    assert!(!list.change_page(&api, &notices, 4).await);
    assert!(!list.change_page(&api, &notices, 1).await);
    assert_eq!(api.calls().len(), 1);
    assert_eq!(list.current_page(), 1);

    api.queue(page_of(cats(&["B"]), 3, 25));
    assert!(list.change_page(&api, &notices, 2).await);
    assert_eq!(list.current_page(), 2);
}

#[tokio::test]
async fn reset_filters_is_idempotent() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut list: ListController<Category, CategoryFilter> = ListController::new("/categories", 10);

    api.queue(page_of(cats(&["Animals"]), 5, 42));
    list.search(&api, &notices, CategoryFilter { name: "Ani".into() }).await;
    assert_eq!(list.filters().name, "Ani");

    api.queue(page_of(cats(&["A", "B"]), 5, 42));
    list.reset_filters(&api, &notices).await;
    let after_once = (list.current_page(), list.filters().clone(), list.total_count());

    api.queue(page_of(cats(&["A", "B"]), 5, 42));
    list.reset_filters(&api, &notices).await;
    let after_twice = (list.current_page(), list.filters().clone(), list.total_count());

    assert_eq!(after_once, after_twice);
    assert_eq!(after_once.0, 1);
    assert_eq!(after_once.1, CategoryFilter::default());

    // both resets sent an unfiltered page-1 query
    for call in &api.calls()[1..] {
        assert!(call.query.iter().any(|(k, v)| k == "Page" && v == "1"));
        assert!(!call.query.iter().any(|(k, _)| k == "Name"));
    }
}

#[tokio::test]
async fn failed_load_keeps_previous_state() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut list: ListController<Category, NoFilter> = ListController::new("/categories", 10);

    api.queue(page_of(cats(&["A", "B"]), 2, 12));
    list.load(&api, &notices, 1).await;

    api.queue(fail(500, "Lỗi máy chủ"));
    assert!(!list.change_page(&api, &notices, 2).await);

    assert_eq!(list.items().len(), 2);
    assert_eq!(list.current_page(), 1);
    assert_eq!(notices.drain().last().unwrap().text, "Lỗi máy chủ");
}

// The stale-response guard: an older in-flight response must not clobber a
// newer one.
#[tokio::test]
async fn stale_responses_are_discarded() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut list: ListController<Category, NoFilter> = ListController::new("/categories", 10);

    api.queue(page_of(cats(&["first"]), 9, 90));
    list.load(&api, &notices, 1).await;

    // user clicks page 2, then page 3 before page 2 resolves
    let pending_two = list.begin(2);
    let pending_three = list.begin(3);

    api.queue(page_of(cats(&["page-two"]), 9, 90));
    let two = api.fetch_page::<Category>("/categories", &list.query_for(2)).await;
    api.queue(page_of(cats(&["page-three"]), 9, 90));
    let three = api.fetch_page::<Category>("/categories", &list.query_for(3)).await;

    // page 3 resolves first and wins
    assert!(list.apply(pending_three, three, &notices));
    assert_eq!(list.current_page(), 3);
    assert_eq!(list.items()[0].name(), "page-three");

    // the late page-2 response is recognized as stale and dropped
    assert!(!list.apply(pending_two, two, &notices));
    assert_eq!(list.current_page(), 3);
    assert_eq!(list.items()[0].name(), "page-three");
}

#[tokio::test]
async fn pagination_window_follows_the_loaded_page() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut list: ListController<Category, NoFilter> = ListController::new("/categories", 10);

    api.queue(page_of(cats(&["x"]), 10, 100));
    list.load(&api, &notices, 7).await;
    assert_eq!(list.page_numbers(), vec![5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn item_create_requires_an_image_but_edit_does_not() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = ItemScreen::new();

    api.queue(page_of(vec![], 0, 0)); // the dropdown load is not under test here
    let _ = screen.load_categories(&api, &notices).await;

    screen.form_mut().open_create();
    screen.form_mut().set_name("Nón lá");
    screen.form_mut().set_category_id("cat-1");
    screen.form_mut().set_description("Phụ kiện trang trí");

    // no image picked yet: refused client-side
    let calls_before = api.calls().len();
    assert!(!screen.submit_form(&api, &notices).await);
    assert_eq!(api.calls().len(), calls_before);
    assert_eq!(notices.drain().last().unwrap().text, "Vui lòng chọn hình ảnh");

    let image = ImageUpload::accept("hat.png", "image/png", vec![1, 2, 3], &notices).unwrap();
    screen.form_mut().set_image(image);

    api.queue(ok_confirmed());
    api.queue(page_of(vec![], 0, 0));
    assert!(screen.submit_form(&api, &notices).await);

    let create_call = api.calls_for("/items")[0].clone();
    let form = create_call.form.unwrap();
    assert!(form.fields().contains(&("Name".to_string(), "Nón lá".to_string())));
    assert!(form.fields().contains(&("IsPremium".to_string(), "false".to_string())));
    assert_eq!(form.file_part().unwrap().file_name, "hat.png");
}

#[tokio::test]
async fn order_filters_reach_the_wire_fully_named() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = OrderScreen::new();

    let filter = OrderFilter {
        email: "buyer@mail.com".into(),
        product_name: "N5".into(),
        min_price: "1000".into(),
        payment_status: Some(PaymentStatus::Cancelled),
        order_type: "course".into(),
        ..Default::default()
    };

    api.queue(page_of(vec![], 0, 0));
    screen.list_mut().search(&api, &notices, filter).await;

    let call = &api.calls()[0];
    assert_eq!(call.path, "/orders");
    let has = |k: &str, v: &str| call.query.iter().any(|(qk, qv)| qk == k && qv == v);
    assert!(has("Email", "buyer@mail.com"));
    assert!(has("Name", "N5"));
    assert!(has("MinPrice", "1000"));
    assert!(has("PaymentStatus", "3"));
    assert!(has("OrderType", "course"));
    assert!(!call.query.iter().any(|(k, _)| k == "MaxPrice"));
}

#[tokio::test]
async fn order_detail_is_a_local_selection() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = OrderScreen::new();

    api.queue(page_of(
        vec![json!({
            "id": "ord-1",
            "courseId": "c-1",
            "itemId": null,
            "purchaseCost": 100000.0,
            "coinCost": 0.0,
            "paidAt": null,
            "paymentStatus": 1,
            "itemName": null,
            "courseTitle": "Tiếng Anh giao tiếp",
            "email": "buyer@mail.com",
        })],
        1,
        1,
    ));
    screen.load(&api, &notices).await;

    let fetches = api.calls().len();
    assert!(screen.open_detail(0));
    let detail = screen.detail().unwrap();
    assert_eq!(detail.product_name(), Some("Tiếng Anh giao tiếp"));
    assert_eq!(detail.payment_status().label(), "Đã thanh toán");
    // nothing extra was fetched
    assert_eq!(api.calls().len(), fetches);

    screen.close_detail();
    assert!(screen.detail().is_none());
    assert!(!screen.open_detail(9));
}

#[tokio::test]
async fn level_range_screen_round_trip() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = LevelRangeScreen::new();

    screen.form_mut().open_create();
    screen.form_mut().set_name("Bậc 1");
    screen.form_mut().set_from_exp("0");
    screen.form_mut().set_to_exp("100");

    api.queue(ok_confirmed());
    api.queue(page_of(vec![], 0, 0));
    assert!(screen.submit_form(&api, &notices).await);

    let call = &api.calls()[0];
    assert_eq!(call.path, "/level-ranges");
    assert_eq!(
        call.body.as_ref().unwrap(),
        &json!({ "name": "Bậc 1", "fromExp": 0, "toExp": 100 })
    );
}

#[tokio::test]
async fn level_range_rejects_inverted_brackets_before_the_network() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = LevelRangeScreen::new();

    screen.form_mut().open_create();
    screen.form_mut().set_name("Bậc lỗi");
    screen.form_mut().set_from_exp("100");
    screen.form_mut().set_to_exp("50");

    assert!(!screen.submit_form(&api, &notices).await);
    assert!(api.calls().is_empty());
    assert_eq!(
        screen.form().errors().get("toExp"),
        "To EXP phải lớn hơn From EXP"
    );
}

#[tokio::test]
async fn revenue_query_carries_the_date_range() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = DashboardScreen::new();

    screen.set_range(
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        chrono::NaiveDate::from_ymd_opt(2025, 1, 31),
    );

    api.queue(common::ok_with(json!({
        "itemRevenue": 1000.0,
        "courseRevenue": 2000.0,
        "premiumRevenue": 500.0,
        "totalRevenue": 3500.0,
    })));
    assert!(screen.load_revenue(&api, &notices).await);
    assert_eq!(screen.revenue().unwrap().total_revenue(), 3500.0);

    let call = &api.calls()[0];
    assert_eq!(call.path, "/dashboards/revenue");
    assert!(call.query.iter().any(|(k, v)| k == "StartDate" && v == "2025-01-01"));
    assert!(call.query.iter().any(|(k, v)| k == "EndDate" && v == "2025-01-31"));
}

#[tokio::test]
async fn ambiguous_delete_warns_and_reconciles() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = CategoryScreen::new();

    api.queue(page_of(cats(&["Animals"]), 1, 1));
    screen.load(&api, &notices).await;

    screen.request_delete("cat-0");
    // the envelope comes back without a `succeeded` flag
    api.queue(ok_ambiguous());
    api.queue(page_of(cats(&["Animals"]), 1, 1));
    screen.confirm_delete(&api, &notices).await;

    let drained = notices.drain();
    let warning = drained.iter().find(|n| n.level == NoticeLevel::Warning).unwrap();
    assert_eq!(warning.text, "Danh mục đã được xóa");

    // the list was re-fetched and still shows the row the server kept
    assert_eq!(screen.list().items().len(), 1);
    assert_eq!(api.calls().last().unwrap().method, "GET");
}

#[tokio::test]
async fn delete_without_confirmation_is_inert() {
    let api = FakeGateway::new();
    let notices = Notices::new();
    let mut screen = CategoryScreen::new();

    screen.request_delete("cat-1");
    screen.cancel_delete();
    assert!(!screen.confirm_delete(&api, &notices).await);
    assert!(api.calls().is_empty());
}
