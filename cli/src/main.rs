use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use leximon_admin::error::AppResult;
use leximon_admin::model::entity::PaymentStatus;
use leximon_admin::notice::Notices;
use leximon_admin::screen::{
    CategoryFilter, CategoryScreen, CourseFilter, CourseScreen, DashboardScreen, ItemFilter,
    ItemScreen, LevelRangeFilter, LevelRangeScreen, LoginScreen, OrderFilter, OrderScreen,
};
use leximon_admin::{AdminApp, build_app};

#[derive(Parser, Debug)]
#[command(about = "Operator CLI for the LexiMon admin dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Drop the persisted session
    Logout,

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Manage shop items
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },

    /// Manage level ranges
    LevelRange {
        #[command(subcommand)]
        action: LevelRangeCommands,
    },

    /// Browse orders (read-only)
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Revenue summary between two dates
    Revenue {
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// End date, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        title: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,
        /// Actually perform the delete
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// List the lessons of one course
    Lessons {
        #[arg(long)]
        course_id: String,
    },
}

/// Category management
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        name: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
    },
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

/// Item management
#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        name: Option<String>,
    },
}

/// Level range management
#[derive(Subcommand, Debug)]
pub enum LevelRangeCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        from_exp: i64,
        #[arg(long)]
        to_exp: i64,
    },
}

/// Order browsing
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        email: Option<String>,
        /// Payment status code: 0 unpaid, 1 paid, 2 failed, 3 cancelled
        #[arg(long)]
        status: Option<i32>,
    },
}

fn parse_date(raw: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            eprintln!("invalid date `{raw}`: {e}");
            std::process::exit(2);
        }
    }
}

fn print_notices(notices: &Notices) {
    for notice in notices.drain() {
        println!("[{:?}] {}", notice.level, notice.text);
    }
}

async fn course_commands(app: &AdminApp, action: CourseCommands) {
    match action {
        CourseCommands::List { page, title } => {
            let mut screen = CourseScreen::new();
            let filter = CourseFilter {
                title: title.unwrap_or_default(),
            };
            screen.list_mut().search(app.api(), app.notices(), filter).await;
            if page > 1 {
                screen.list_mut().change_page(app.api(), app.notices(), page).await;
            }
            for course in screen.list().items() {
                println!(
                    "{} | {} | price={} coin={} | active={}",
                    course.course_id(),
                    course.title(),
                    course.price(),
                    course.coin(),
                    course.is_active()
                );
            }
            println!(
                "page {}/{} ({} courses)",
                screen.list().current_page(),
                screen.list().total_pages(),
                screen.list().total_count()
            );
        }

        CourseCommands::Delete { id, yes } => {
            if !yes {
                eprintln!("refusing to delete course {id} without --yes");
                return;
            }
            let mut screen = CourseScreen::new();
            screen.load(app.api(), app.notices()).await;
            screen.request_delete(id);
            screen.confirm_delete(app.api(), app.notices()).await;
        }

        CourseCommands::Lessons { course_id } => {
            let mut screen = CourseScreen::new();
            screen
                .lessons_mut()
                .open(app.api(), app.notices(), &course_id)
                .await;
            for lesson in screen.lessons().list().items() {
                println!("{} | {}", lesson.lesson_id(), lesson.title());
            }
            println!("{} lessons", screen.lessons().list().total_count());
        }
    }
}

async fn category_commands(app: &AdminApp, action: CategoryCommands) {
    match action {
        CategoryCommands::List { page, name } => {
            let mut screen = CategoryScreen::new();
            let filter = CategoryFilter {
                name: name.unwrap_or_default(),
            };
            screen.list_mut().search(app.api(), app.notices(), filter).await;
            if page > 1 {
                screen.list_mut().change_page(app.api(), app.notices(), page).await;
            }
            for category in screen.list().items() {
                println!("{} | {} | active={}", category.id(), category.name(), category.is_active());
            }
        }

        CategoryCommands::Add { name } => {
            let mut screen = CategoryScreen::new();
            screen.form_mut().open_create();
            screen.form_mut().set_name(name);
            screen.submit_form(app.api(), app.notices()).await;
        }

        CategoryCommands::Delete { id, yes } => {
            if !yes {
                eprintln!("refusing to delete category {id} without --yes");
                return;
            }
            let mut screen = CategoryScreen::new();
            screen.load(app.api(), app.notices()).await;
            screen.request_delete(id);
            screen.confirm_delete(app.api(), app.notices()).await;
        }
    }
}

async fn item_commands(app: &AdminApp, action: ItemCommands) {
    match action {
        ItemCommands::List { page, name } => {
            let mut screen = ItemScreen::new();
            let filter = ItemFilter {
                name: name.unwrap_or_default(),
            };
            screen.list_mut().search(app.api(), app.notices(), filter).await;
            if page > 1 {
                screen.list_mut().change_page(app.api(), app.notices(), page).await;
            }
            for item in screen.list().items() {
                println!(
                    "{} | {} | premium={} price={} coin={}",
                    item.item_id(),
                    item.name(),
                    item.is_premium(),
                    item.price(),
                    item.coin()
                );
            }
        }
    }
}

async fn level_range_commands(app: &AdminApp, action: LevelRangeCommands) {
    match action {
        LevelRangeCommands::List { page } => {
            let mut screen = LevelRangeScreen::new();
            screen
                .list_mut()
                .search(app.api(), app.notices(), LevelRangeFilter::default())
                .await;
            if page > 1 {
                screen.list_mut().change_page(app.api(), app.notices(), page).await;
            }
            for range in screen.list().items() {
                println!(
                    "{} | {} | {}..{}",
                    range.id(),
                    range.name(),
                    range.from_exp(),
                    range.to_exp()
                );
            }
        }

        LevelRangeCommands::Add { name, from_exp, to_exp } => {
            let mut screen = LevelRangeScreen::new();
            screen.form_mut().open_create();
            screen.form_mut().set_name(name);
            screen.form_mut().set_from_exp(from_exp.to_string());
            screen.form_mut().set_to_exp(to_exp.to_string());
            screen.submit_form(app.api(), app.notices()).await;
        }
    }
}

async fn order_commands(app: &AdminApp, action: OrderCommands) {
    match action {
        OrderCommands::List { page, email, status } => {
            let mut screen = OrderScreen::new();
            let filter = OrderFilter {
                email: email.unwrap_or_default(),
                payment_status: status.map(PaymentStatus::from),
                ..Default::default()
            };
            screen.list_mut().search(app.api(), app.notices(), filter).await;
            if page > 1 {
                screen.list_mut().change_page(app.api(), app.notices(), page).await;
            }
            for order in screen.list().items() {
                println!(
                    "{} | {} | {} | cost={} coin={} | {}",
                    order.id(),
                    order.email(),
                    order.product_name().unwrap_or("-"),
                    order.purchase_cost(),
                    order.coin_cost(),
                    order.payment_status().label()
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    leximon_admin::setup_trace();
    let args = Cli::parse();

    let app = build_app().await?;

    match args.command {
        Commands::Login { email, password } => {
            let mut screen = LoginScreen::new();
            screen.set_email(email);
            screen.set_password(password);
            let ok = screen
                .submit(app.api(), app.notices(), app.session(), app.navigator())
                .await;
            if ok {
                if let Some(user) = app.session().user() {
                    println!("signed in as {} ({})", user.email(), user.role());
                }
            }
        }

        Commands::Logout => {
            LoginScreen::logout(app.session(), app.navigator());
            println!("signed out");
        }

        Commands::Course { action } => course_commands(&app, action).await,
        Commands::Category { action } => category_commands(&app, action).await,
        Commands::Item { action } => item_commands(&app, action).await,
        Commands::LevelRange { action } => level_range_commands(&app, action).await,
        Commands::Order { action } => order_commands(&app, action).await,

        Commands::Revenue { start, end } => {
            let mut screen = DashboardScreen::new();
            screen.set_range(
                start.as_deref().map(parse_date),
                end.as_deref().map(parse_date),
            );
            if screen.load_revenue(app.api(), app.notices()).await {
                let revenue = screen.revenue().unwrap();
                println!("courses:  {}", revenue.course_revenue());
                println!("items:    {}", revenue.item_revenue());
                println!("premium:  {}", revenue.premium_revenue());
                println!("total:    {}", revenue.total_revenue());
            }
        }
    }

    print_notices(app.notices());
    Ok(())
}
