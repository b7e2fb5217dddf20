use anyhow::Context;
use clap::Parser;
use vc_basket::{ShoppingList, format_price};
use vc_listen::{MockRecognizer, SpeechCapture};
use vc_shop_api::{AuthApi, CartSync, ProductsApi, ReqwestClient, VoiceApi};
use vc_turn::{APPLIED_CLEAR_DELAY, CommandProcessor, Notify, TurnPhase, TurnSnapshot};

#[derive(Parser)]
#[command(name = "voicecart", about = "Voice shopping assistant demo")]
struct Cli {
    #[arg(long, env = "VOICECART_API_BASE")]
    api_base: String,

    #[arg(long, env = "VOICECART_TOKEN")]
    token: Option<String>,

    #[arg(long, env = "VOICECART_USER_ID")]
    user_id: Option<String>,

    #[arg(long, requires = "password")]
    username: Option<String>,

    #[arg(long, requires = "username")]
    password: Option<String>,

    /// Utterance fed through the scripted recognizer, e.g. "do packet chips jodo".
    #[arg(long)]
    say: Option<String>,

    /// Search the catalog and print the matches.
    #[arg(long)]
    search: Option<String>,

    /// Print the server cart for --user-id.
    #[arg(long)]
    cart: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let http = ReqwestClient::new(&cli.api_base).context("invalid --api-base")?;
    if let Some(token) = &cli.token {
        http.set_token(Some(token.clone()));
    }

    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        let response = AuthApi::new(http.clone())
            .login(username, password)
            .await
            .context("login failed")?;
        match response.token {
            Some(token) => http.set_token(Some(token)),
            None => println!("login succeeded but returned no token"),
        }
    }

    if let Some(query) = &cli.search {
        let products = ProductsApi::new(http.clone()).search(query).await?;
        println!("{} product(s) for {query:?}:", products.len());
        for p in &products {
            let brand = p.brand.as_deref().unwrap_or("-");
            println!("  {}  {}  [{}]", p.name, format_price(p.price), brand);
        }
    }

    if cli.cart {
        let user_id = cli
            .user_id
            .as_deref()
            .context("--cart requires --user-id")?;
        let mut sync = CartSync::new(http.clone());
        sync.load(user_id).await?;
        println!("cart ({} items):", sync.cart().items().len());
        for item in sync.cart().items() {
            println!(
                "  {} x{}  {}",
                item.name,
                item.quantity,
                format_price(item.price)
            );
        }
        println!("cart total: {}", format_price(Some(sync.cart().total())));
    }

    if let Some(text) = &cli.say {
        run_voice_turn(http, text).await?;
    }

    Ok(())
}

/// Terminal stand-in for the UI's toast.
struct Toast;

impl Notify for Toast {
    fn notify(&self, message: &str) {
        println!("· {message}");
    }
}

async fn run_voice_turn(http: ReqwestClient, text: &str) -> anyhow::Result<()> {
    let capture = SpeechCapture::new(MockRecognizer::speaking(text));
    let mut processor =
        CommandProcessor::new(capture, VoiceApi::new(http), ShoppingList::new(), Toast);

    processor.start_listening();
    render(&processor.snapshot());

    processor.run_capture().await;
    render(&processor.snapshot());

    let snapshot = processor.snapshot();
    if matches!(snapshot.phase, TurnPhase::Parsed | TurnPhase::Confirming) {
        let chosen = snapshot
            .result
            .as_ref()
            .and_then(|r| r.matches.first().cloned());
        processor.confirm_action(None, chosen.as_ref()).await;
        render(&processor.snapshot());

        if processor.phase() == TurnPhase::Applied {
            tokio::time::sleep(APPLIED_CLEAR_DELAY).await;
            processor.finish_turn();
        }
    }

    let list = processor.target();
    println!("list ({} items):", list.len());
    for item in list.items() {
        println!("  {} x{}  {}", item.name, item.qty, format_price(item.price));
    }
    println!("list total: {}", format_price(Some(list.total())));

    Ok(())
}

fn render(snapshot: &TurnSnapshot) {
    let mut line = format!("[{}]", snapshot.phase);
    if let Some(recognized) = &snapshot.recognized {
        line.push_str(&format!(" heard: {recognized:?}"));
    }
    if let Some(result) = &snapshot.result {
        line.push_str(&format!(" intent: {}", result.intent));
        for m in &result.matches {
            line.push_str(&format!(
                " | {} {} (score {:.2})",
                m.name,
                format_price(m.price),
                m.score
            ));
        }
    }
    if let Some(error) = &snapshot.error {
        line.push_str(&format!(" error: {error}"));
    }
    println!("{line}");
}
