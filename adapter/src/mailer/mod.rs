use base64::{engine::general_purpose, Engine as _};
use kernel::mailer::{BookingMailContext, Mail, Mailer};
use reqwest::Client;
use shared::config::MailConfig;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

// 送信キュー。ハンドラー側は enqueue するだけで、
// 実際の配送はバックグラウンドのワーカータスクが行う
pub struct MailQueue {
    tx: UnboundedSender<Mail>,
}

impl MailQueue {
    pub fn new(config: MailConfig) -> (Self, MailWorker) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = MailWorker {
            rx,
            client: Client::new(),
            config,
        };
        (Self { tx }, worker)
    }
}

impl Mailer for MailQueue {
    fn enqueue(&self, mail: Mail) {
        // 受信側が停止していても呼び出し元へはエラーを返さない
        if self.tx.send(mail).is_err() {
            tracing::warn!("mail queue is closed; dropping mail");
        }
    }
}

pub struct MailWorker {
    rx: UnboundedReceiver<Mail>,
    client: Client,
    config: MailConfig,
}

impl MailWorker {
    pub async fn run(mut self) {
        while let Some(mail) = self.rx.recv().await {
            if let Err(e) = self.deliver(&mail).await {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to deliver mail"
                );
            }
        }
    }

    // Gmail API 経由でメールを送信する
    async fn deliver(&self, mail: &Mail) -> anyhow::Result<()> {
        let RenderedMail { to, subject, body } = render(mail);

        let message_str = format!(
            "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            to, subject, body
        );
        let encoded_message = general_purpose::URL_SAFE_NO_PAD.encode(message_str.as_bytes());

        let res = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({ "raw": encoded_message }))
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("gmail send failed: {}", res.text().await?);
        }

        Ok(())
    }
}

struct RenderedMail {
    to: String,
    subject: String,
    body: String,
}

fn render(mail: &Mail) -> RenderedMail {
    match mail {
        Mail::BookingCancel { to, booking } => RenderedMail {
            to: to.clone(),
            subject: "予約キャンセルのお知らせ".into(),
            body: format!(
                "{} のご予約はキャンセルされました。\n予約番号：{}",
                format_start_date(booking),
                booking.booking_id
            ),
        },
        Mail::BookingForceCancel { to, booking } => RenderedMail {
            to: to.clone(),
            subject: "予約キャンセルのお知らせ（運営都合）".into(),
            body: format!(
                "{} のご予約は運営都合によりキャンセルされました。\nご迷惑をおかけして申し訳ありません。\n予約番号：{}",
                format_start_date(booking),
                booking.booking_id
            ),
        },
        Mail::BookingNotification { to, booking, upcoming } => {
            let mut body = format!(
                "{} のご予約のステータスが「{}」に変更されました。\n",
                format_start_date(booking),
                booking.status
            );
            if upcoming.is_empty() {
                body.push_str("\n今後のご予約はありません。\n");
            } else {
                body.push_str("\n今後のご予約：\n");
                for context in upcoming {
                    body.push_str(&format!("・{}\n", format_start_date(context)));
                }
            }
            RenderedMail {
                to: to.clone(),
                subject: "予約状況のお知らせ".into(),
                body,
            }
        }
    }
}

fn format_start_date(context: &BookingMailContext) -> String {
    context.start_date.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use kernel::model::{booking::BookingStatus, id::BookingId};

    use super::*;

    fn context(status: BookingStatus) -> BookingMailContext {
        BookingMailContext {
            booking_id: BookingId::new(),
            start_date: Utc::now(),
            status,
        }
    }

    #[test]
    fn render_cancel_and_force_cancel_have_distinct_subjects() {
        let cancel = render(&Mail::BookingCancel {
            to: "owner@example.com".into(),
            booking: context(BookingStatus::Cancel),
        });
        let force = render(&Mail::BookingForceCancel {
            to: "owner@example.com".into(),
            booking: context(BookingStatus::ForceCancel),
        });

        assert_eq!(cancel.to, "owner@example.com");
        assert_ne!(cancel.subject, force.subject);
        assert!(force.body.contains("運営都合"));
    }

    #[test]
    fn render_notification_lists_upcoming_bookings() {
        let upcoming: Vec<_> = (1..=3)
            .map(|i| BookingMailContext {
                booking_id: BookingId::new(),
                start_date: Utc::now() + Duration::hours(i),
                status: BookingStatus::Active,
            })
            .collect();
        let rendered = render(&Mail::BookingNotification {
            to: "guest@example.com".into(),
            booking: context(BookingStatus::ForceCancel),
            upcoming,
        });

        assert_eq!(rendered.body.matches('・').count(), 3);
        assert!(rendered.body.contains("force_cancel"));
    }

    #[tokio::test]
    async fn enqueue_passes_mail_to_worker_channel() {
        let config = MailConfig {
            endpoint: "http://localhost:1/send".into(),
            access_token: "dummy".into(),
        };
        let (queue, mut worker) = MailQueue::new(config);

        queue.enqueue(Mail::BookingCancel {
            to: "owner@example.com".into(),
            booking: context(BookingStatus::Cancel),
        });

        let mail = worker.rx.recv().await.unwrap();
        assert!(matches!(mail, Mail::BookingCancel { .. }));
    }
}
