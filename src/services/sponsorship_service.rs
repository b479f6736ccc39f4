use std::sync::Arc;
use std::time::Duration;

use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{PaymentOutcome, PaymentSession, PaymentWidget};
use crate::db::DonationStore;
use crate::models::content::{self, Highlight};
use crate::models::{Notification, Progress};
use crate::services::donation_service::{Checkout, DonationError, DonationFlow, Settlement};
use crate::services::notify_service::Notifier;
use crate::services::progress_service::ProgressAggregator;
use crate::utils::format::{format_naira, progress_bar};

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Default)]
struct ViewState {
    amount: String,
    loading: bool,
}

/// Snapshot of everything the donation card shows
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub progress: Progress,
    pub amount: String,
    pub loading: bool,
}

impl PageView {
    /// e.g. `₦2,500,000 / ₦5,000,000`
    pub fn progress_label(&self) -> String {
        format!("{} / {}", format_naira(self.progress.total), format_naira(self.progress.target))
    }

    /// e.g. `50.0% of target reached`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}% of target reached", self.progress.percentage())
    }

    pub fn donate_label(&self) -> &'static str {
        if self.loading {
            content::PROCESSING_LABEL
        } else {
            content::DONATE_LABEL
        }
    }
}

/// A checkout that is open for the donor, plus the task that will settle it
#[derive(Debug)]
pub struct OpenedCheckout {
    pub donation_id: String,
    pub amount: f64,
    pub checkout_url: String,
    pub expires_in: Option<Duration>,
    pub settled: JoinHandle<Settlement>,
}

/// One viewer's sponsorship page: view state plus the donate flow behind it
#[derive(Clone)]
pub struct SponsorshipPage {
    flow: Arc<DonationFlow>,
    progress: Arc<ProgressAggregator>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<ViewState>>,
}

impl SponsorshipPage {
    pub fn new(
        store: Arc<dyn DonationStore>,
        widget: Arc<dyn PaymentWidget>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let progress = Arc::new(ProgressAggregator::new(store.clone()));
        let flow = Arc::new(DonationFlow::new(store, widget, notifier.clone(), progress.clone()));
        Self {
            flow,
            progress,
            notifier,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Load the completed total for the first render
    pub async fn mount(&self) -> f64 {
        self.progress.refresh().await
    }

    pub async fn refresh(&self) -> f64 {
        self.progress.refresh().await
    }

    pub async fn set_amount(&self, input: &str) {
        self.state.lock().await.amount = input.to_string();
    }

    /// True while a submit is between validation and the widget opening
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    #[cfg(test)]
    pub(crate) async fn set_loading(&self, loading: bool) {
        self.state.lock().await.loading = loading;
    }

    pub async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        PageView {
            progress: self.progress.progress().await,
            amount: state.amount.clone(),
            loading: state.loading,
        }
    }

    /// Submit the current amount.
    ///
    /// While a submit is in flight the page is loading and further submits
    /// return `Busy` without touching the store.
    pub async fn donate(&self, email: &str) -> Result<OpenedCheckout, DonationError> {
        let amount = {
            let mut state = self.state.lock().await;
            if state.loading {
                debug!("Donate ignored, page is still processing");
                return Err(DonationError::Busy);
            }
            state.loading = true;
            state.amount.clone()
        };

        let submitted = self.flow.submit(&amount, email).await;
        self.state.lock().await.loading = false;

        let Checkout { donation_id, amount, session } = submitted?;
        let PaymentSession { checkout_url, outcome, expires_in } = session;

        let page = self.clone();
        let id = donation_id.clone();
        let settled = tokio::spawn(async move {
            let outcome = outcome.await.unwrap_or(PaymentOutcome::Closed);
            let settlement = page.flow.settle(&id, outcome).await;
            match &settlement {
                Settlement::Completed { donation_id, reference } => {
                    debug!("Donation {} settled with reference {}", donation_id, reference);
                    page.state.lock().await.amount.clear();
                }
                Settlement::Failed { donation_id } => debug!("Donation {} settled as failed", donation_id),
            }
            settlement
        });

        Ok(OpenedCheckout {
            donation_id,
            amount,
            checkout_url,
            expires_in,
            settled,
        })
    }

    /// Placeholder: announces the download, no file is produced yet
    pub async fn download_pitch_deck(&self) {
        self.notifier.notify(Notification::pitch_deck_started()).await;
    }
}

fn highlight_lines(items: &[Highlight]) -> String {
    items
        .iter()
        .map(|h| format!("• **{}:** {}", h.title, h.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn create_donation_card_embed(view: &PageView) -> CreateEmbed {
    let amount = if view.amount.is_empty() {
        "Enter amount".to_string()
    } else {
        format!("₦{}", view.amount)
    };

    CreateEmbed::default()
        .title(content::DONATION_CARD_TITLE)
        .field(
            "Progress",
            format!(
                "{}\n`{}`\n{}",
                view.progress_label(),
                progress_bar(view.progress.percentage(), PROGRESS_BAR_WIDTH),
                view.percentage_label()
            ),
            false,
        )
        .field(content::AMOUNT_LABEL, amount, true)
        .field(
            "Actions",
            format!(
                "`$donate <amount> [email]` - {}\n`$pitchdeck` - {}",
                view.donate_label(),
                content::PITCH_DECK_LABEL
            ),
            false,
        )
        .footer(CreateEmbedFooter::new(view.donate_label()))
        .color(0x2e7d32)
}

/// The whole page as a sequence of embeds, top to bottom
pub fn create_page_embeds(view: &PageView, asset_base_url: Option<&str>) -> Vec<CreateEmbed> {
    let hero = CreateEmbed::default()
        .title(content::HERO_TITLE)
        .description(content::HERO_TAGLINE)
        .color(0x2e7d32);

    let mut why = CreateEmbed::default()
        .title(content::WHY_SPONSOR_TITLE)
        .description(format!(
            "{}\n\n{}",
            content::WHY_SPONSOR_TEXT,
            highlight_lines(&content::WHY_SPONSOR_HIGHLIGHTS)
        ))
        .color(0x00b0f4);

    let mission = CreateEmbed::default()
        .title(content::MISSION_TITLE)
        .description(content::MISSION_TEXT)
        .color(0xf9a825);

    let mut impact = CreateEmbed::default().title(content::IMPACT_TITLE).color(0x00b0f4);
    for item in content::IMPACT_ITEMS.iter() {
        impact = impact.field(item.title, item.text, false);
    }

    if let Some(base) = asset_base_url {
        why = why
            .image(content::BREEDING_IMAGE.url(base))
            .footer(CreateEmbedFooter::new(content::BREEDING_IMAGE.alt));
        impact = impact
            .image(content::POULTRY_IMAGE.url(base))
            .footer(CreateEmbedFooter::new(content::POULTRY_IMAGE.alt));
    }

    vec![hero, why, mission, create_donation_card_embed(view), impact]
}

/// Warning shown under the checkout link, when the widget gave it a lifetime
fn expiry_notice(expires_in: Option<Duration>) -> Option<String> {
    let secs = expires_in?.as_secs();
    let (count, unit) = if secs >= 60 {
        (secs.div_ceil(60), "minute")
    } else {
        (secs.max(1), "second")
    };
    let plural = if count == 1 { "" } else { "s" };
    Some(format!(
        "This link expires in {} {}{}. Payments made after that are not counted, so start a new donation instead.",
        count, unit, plural
    ))
}

pub fn create_checkout_embed(checkout: &OpenedCheckout) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("💳 Complete Your Donation")
        .description(format!(
            "Finish paying **{}** on the secure Paystack checkout:\n{}",
            format_naira(checkout.amount),
            checkout.checkout_url
        ))
        .field("Donation ID", format!("`{}`", checkout.donation_id), false)
        .url(&checkout.checkout_url)
        .color(0x00b0f4);

    if let Some(notice) = expiry_notice(checkout.expires_in) {
        embed = embed.field("⏰ Link expires", notice, false);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::PROGRESS_TARGET;
    use crate::models::DonationStatus;
    use crate::testing::{FakeWidget, InMemoryDonationStore, RecordingNotifier};

    fn page() -> (SponsorshipPage, Arc<InMemoryDonationStore>, Arc<FakeWidget>, Arc<RecordingNotifier>) {
        let store = Arc::new(InMemoryDonationStore::new());
        let widget = Arc::new(FakeWidget::watching(store.clone()));
        let notifier = Arc::new(RecordingNotifier::new());
        let page = SponsorshipPage::new(store.clone(), widget.clone(), notifier.clone());
        (page, store, widget, notifier)
    }

    #[test]
    fn test_view_labels() {
        let view = PageView {
            progress: Progress::new(2_500_000.0),
            amount: String::new(),
            loading: false,
        };
        assert_eq!(view.progress_label(), "₦2,500,000 / ₦5,000,000");
        assert_eq!(view.percentage_label(), "50.0% of target reached");
        assert_eq!(view.donate_label(), "Donate Now");

        let busy = PageView { loading: true, ..view };
        assert_eq!(busy.donate_label(), "Processing...");
    }

    #[test]
    fn test_percentage_label_clamped() {
        let view = PageView {
            progress: Progress::new(PROGRESS_TARGET * 1.2),
            amount: String::new(),
            loading: false,
        };
        assert_eq!(view.percentage_label(), "100.0% of target reached");
    }

    #[test]
    fn test_expiry_notice() {
        assert_eq!(expiry_notice(None), None);
        assert_eq!(
            expiry_notice(Some(Duration::from_secs(900))).unwrap(),
            "This link expires in 15 minutes. Payments made after that are not counted, so start a new donation instead."
        );
        assert!(expiry_notice(Some(Duration::from_secs(61))).unwrap().starts_with("This link expires in 2 minutes."));
        assert!(expiry_notice(Some(Duration::from_secs(60))).unwrap().starts_with("This link expires in 1 minute."));
        assert!(expiry_notice(Some(Duration::from_secs(30))).unwrap().starts_with("This link expires in 30 seconds."));
    }

    #[tokio::test]
    async fn test_mount_loads_total() {
        let (page, store, _, _) = page();
        store.seed(750_000.0, DonationStatus::Completed).await;
        store.seed(50_000.0, DonationStatus::Pending).await;

        assert_eq!(page.view().await.progress.total, 0.0);
        assert_eq!(page.mount().await, 750_000.0);
        assert_eq!(page.view().await.progress.total, 750_000.0);
    }

    #[tokio::test]
    async fn test_success_clears_amount_and_updates_total() {
        let (page, store, widget, notifier) = page();
        page.mount().await;
        page.set_amount("5000").await;

        let opened = page.donate("donor@example.com").await.unwrap();
        assert_eq!(opened.checkout_url, format!("https://checkout.test/{}", opened.donation_id));
        assert!(!page.view().await.loading);
        assert_eq!(page.view().await.amount, "5000");

        widget.resolve(PaymentOutcome::Success { reference: "T-42".to_string() });
        let settlement = opened.settled.await.unwrap();

        assert!(matches!(settlement, Settlement::Completed { .. }));
        let view = page.view().await;
        assert_eq!(view.amount, "");
        assert_eq!(view.progress.total, 5000.0);
        assert_eq!(store.get(&opened.donation_id).unwrap().status, DonationStatus::Completed);
        assert_eq!(notifier.titles(), vec!["Thank you!".to_string()]);
    }

    #[tokio::test]
    async fn test_close_keeps_amount() {
        let (page, store, widget, notifier) = page();
        page.set_amount("300").await;
        let opened = page.donate("donor@example.com").await.unwrap();

        widget.resolve(PaymentOutcome::Closed);
        let settlement = opened.settled.await.unwrap();

        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert_eq!(page.view().await.amount, "300");
        assert_eq!(store.get(&opened.donation_id).unwrap().status, DonationStatus::Failed);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_widget_reads_as_close() {
        let (page, store, widget, _) = page();
        page.set_amount("300").await;
        let opened = page.donate("donor@example.com").await.unwrap();

        widget.abandon();
        opened.settled.await.unwrap();

        assert_eq!(store.get(&opened.donation_id).unwrap().status, DonationStatus::Failed);
    }

    #[tokio::test]
    async fn test_invalid_amount_resets_loading() {
        let (page, store, _, notifier) = page();
        page.set_amount("-1").await;

        let err = page.donate("donor@example.com").await.unwrap_err();
        assert!(matches!(err, DonationError::InvalidAmount(_)));
        assert!(!page.view().await.loading);
        assert!(store.rows().is_empty());
        assert_eq!(notifier.titles(), vec!["Invalid amount".to_string()]);
    }

    #[tokio::test]
    async fn test_busy_page_rejects_second_submit() {
        let (page, store, _, _) = page();
        page.set_amount("100").await;
        page.set_loading(true).await;

        let err = page.donate("donor@example.com").await.unwrap_err();
        assert!(matches!(err, DonationError::Busy));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_pitch_deck_only_notifies() {
        let (page, store, widget, notifier) = page();
        page.download_pitch_deck().await;

        assert_eq!(notifier.notifications(), vec![Notification::pitch_deck_started()]);
        assert!(store.rows().is_empty());
        assert!(widget.requests().is_empty());
    }
}
