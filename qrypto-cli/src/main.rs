//! Qrypto CLI - lattice signatures from the command line.

use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use qrypto::dsa::{Dilithium5, MlDsa87, ParameterSet, SigningMode};
use rand::rng;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zeroize::{Zeroize, Zeroizing};

/// Post-quantum signature CLI tool
#[derive(Parser)]
#[command(name = "qrypto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen {
        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "ml-dsa-87")]
        algo: Algorithm,

        /// Output file prefix (creates `<prefix>.pub` and `<prefix>.sec`)
        #[arg(short, long)]
        output: String,

        /// 32-byte seed as 64 lowercase hex digits (random if omitted)
        #[arg(long, value_parser = parse_hex_arg)]
        seed: Option<HexBytes>,

        /// Print the seed the keys were derived from
        #[arg(long)]
        print_seed: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Sign a message
    Sign {
        /// Path to the signing key file
        #[arg(long = "key")]
        key: PathBuf,

        /// File holding the message
        #[arg(short, long, required_unless_present = "message_hex", conflicts_with = "message_hex")]
        input: Option<PathBuf>,

        /// Message as lowercase hex
        #[arg(long, value_parser = parse_hex_arg)]
        message_hex: Option<HexBytes>,

        /// Output file for the signature
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,

        /// Algorithm (taken from the PEM label when omitted)
        #[arg(long, value_enum)]
        algo: Option<Algorithm>,

        /// Mix fresh randomness into the signature
        #[arg(long)]
        randomized: bool,

        #[command(flatten)]
        context: ContextArgs,

        /// Write `signature || message` instead of a detached signature
        #[arg(long)]
        attached: bool,
    },

    /// Verify a detached signature
    Verify {
        /// Path to the verification (public) key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// File holding the message
        #[arg(short, long, required_unless_present = "message_hex", conflicts_with = "message_hex")]
        input: Option<PathBuf>,

        /// Message as lowercase hex
        #[arg(long, value_parser = parse_hex_arg)]
        message_hex: Option<HexBytes>,

        /// Signature file
        #[arg(short, long)]
        signature: PathBuf,

        /// Algorithm (detected from PEM labels or the signature size when omitted)
        #[arg(long, value_enum)]
        algo: Option<Algorithm>,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Verify an attached signature and recover the message
    Open {
        /// Path to the verification (public) key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Signed file produced by `sign --attached`
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the recovered message (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Algorithm (taken from the PEM labels when omitted)
        #[arg(long, value_enum)]
        algo: Option<Algorithm>,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Display information about supported algorithms
    Info,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Default)]
struct ContextArgs {
    /// Context string (UTF-8); ML-DSA-87 defaults to "ZOND"
    #[arg(long, conflicts_with = "context_hex")]
    context: Option<String>,

    /// Context string as lowercase hex
    #[arg(long, value_parser = parse_hex_arg)]
    context_hex: Option<HexBytes>,
}

impl ContextArgs {
    fn bytes(&self) -> Option<&[u8]> {
        match (&self.context, &self.context_hex) {
            (Some(s), _) => Some(s.as_bytes()),
            (None, Some(h)) => Some(&h.0),
            (None, None) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// ML-DSA-87 (FIPS 204, NIST Security Level 5)
    #[value(name = "ml-dsa-87")]
    MlDsa87,
    /// Dilithium5 (CRYSTALS round 3, NIST Security Level 5)
    #[value(name = "dilithium5")]
    Dilithium5,
}

impl Algorithm {
    const ALL: [Algorithm; 2] = [Algorithm::MlDsa87, Algorithm::Dilithium5];

    /// Prefix of every PEM label written for this algorithm.
    fn pem_prefix(self) -> &'static str {
        match self {
            Algorithm::MlDsa87 => "ML-DSA-87",
            Algorithm::Dilithium5 => "DILITHIUM5",
        }
    }

    fn signature_size(self) -> usize {
        match self {
            Algorithm::MlDsa87 => <MlDsa87 as ParameterSet>::SIG_BYTES,
            Algorithm::Dilithium5 => <Dilithium5 as ParameterSet>::SIG_BYTES,
        }
    }

    fn from_pem_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| label.starts_with(a.pem_prefix()))
    }

    fn from_signature_size(size: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.signature_size() == size)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::MlDsa87 => write!(f, "ML-DSA-87"),
            Algorithm::Dilithium5 => write!(f, "Dilithium5"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Hexadecimal encoding
    Hex,
    /// Base64 encoding
    Base64,
    /// PEM format with headers
    Pem,
}

/// Bytes parsed from a strict hex argument.
#[derive(Clone, Debug, PartialEq, Eq)]
struct HexBytes(Vec<u8>);

/// Parses command-line hex: lowercase digits only, even length, no `0x`.
fn parse_hex_arg(s: &str) -> std::result::Result<HexBytes, String> {
    if s.starts_with("0x") || s.starts_with("0X") {
        return Err("hex must not carry a 0x prefix".into());
    }
    if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(format!("invalid hex character {c:?} (use lowercase 0-9a-f)"));
    }
    if s.len() % 2 != 0 {
        return Err(format!("hex has odd length {}", s.len()));
    }
    hex::decode(s).map(HexBytes).map_err(|e| e.to_string())
}

/// Encode bytes to the specified format
fn encode_output(data: &[u8], format: OutputFormat, label: &str) -> String {
    match format {
        OutputFormat::Hex => hex::encode(data),
        OutputFormat::Base64 => BASE64.encode(data),
        OutputFormat::Pem => {
            let b64 = BASE64.encode(data);
            let wrapped = b64
                .as_bytes()
                .chunks(64)
                .map(|chunk| String::from_utf8_lossy(chunk))
                .collect::<Vec<_>>()
                .join("\n");
            format!("-----BEGIN {label}-----\n{wrapped}\n-----END {label}-----\n")
        }
    }
}

/// Check if a string is valid hexadecimal
fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Decoded file contents plus the PEM label, if the file was PEM.
struct Decoded {
    bytes: Zeroizing<Vec<u8>>,
    label: Option<String>,
}

/// Decode file contents with auto-detection of format.
/// Detection order: PEM (by header) -> Hex (if all hex chars) -> Base64.
fn decode_input(data: &str) -> Result<Decoded> {
    let data = data.trim();

    if let Some(rest) = data.strip_prefix("-----BEGIN ") {
        let lines: Vec<&str> = data.lines().collect();
        if lines.len() < 3 {
            bail!("Invalid PEM format");
        }
        let label = rest
            .lines()
            .next()
            .and_then(|l| l.strip_suffix("-----"))
            .ok_or_else(|| anyhow!("Invalid PEM header"))?
            .to_string();
        let footer = format!("-----END {label}-----");
        if lines[lines.len() - 1].trim() != footer {
            bail!("PEM footer does not match header {label:?}");
        }
        let b64: String = lines[1..lines.len() - 1].iter().map(|l| l.trim()).collect();
        let bytes = BASE64
            .decode(&b64)
            .context("Failed to decode PEM base64 content")?;
        return Ok(Decoded {
            bytes: Zeroizing::new(bytes),
            label: Some(label),
        });
    }

    let bytes = if is_hex(data) && data.len() % 2 == 0 {
        hex::decode(data).context("Failed to decode hex")?
    } else {
        BASE64.decode(data).context("Failed to decode base64")?
    };
    Ok(Decoded {
        bytes: Zeroizing::new(bytes),
        label: None,
    })
}

fn read_decoded(path: &Path, what: &str) -> Result<Decoded> {
    let mut data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {what} file"))?;
    let decoded = decode_input(&data);
    data.zeroize();
    decoded.with_context(|| format!("Invalid {what} file {}", path.display()))
}

fn read_message(input: Option<&PathBuf>, message_hex: Option<&HexBytes>) -> Result<Vec<u8>> {
    match (input, message_hex) {
        (Some(path), _) => fs::read(path).context("Failed to read input file"),
        (None, Some(hex)) => Ok(hex.0.clone()),
        (None, None) => bail!("either --input or --message-hex is required"),
    }
}

/// Picks the algorithm: `--algo` first, then any PEM label, then `fallback`.
fn resolve_algorithm(
    explicit: Option<Algorithm>,
    labels: &[Option<&str>],
    fallback: Option<Algorithm>,
) -> Result<Algorithm> {
    let from_labels: Vec<Algorithm> = labels
        .iter()
        .flatten()
        .filter_map(|l| Algorithm::from_pem_label(l))
        .collect();
    if let Some(first) = from_labels.first() {
        if from_labels.iter().any(|a| a != first) {
            bail!("PEM labels name different algorithms");
        }
    }

    match (explicit, from_labels.first().copied()) {
        (Some(a), Some(b)) if a != b => bail!("--algo {a} contradicts PEM label for {b}"),
        (Some(a), _) => Ok(a),
        (None, Some(b)) => Ok(b),
        (None, None) => fallback.ok_or_else(|| {
            anyhow!("Cannot tell ML-DSA-87 from Dilithium5 by key size; pass --algo")
        }),
    }
}

/// Byte-level operations of one signature family.
trait Family {
    fn keygen(seed: Option<&[u8]>) -> Result<KeyMaterial>;
    fn sign(
        sk: &[u8],
        message: &[u8],
        context: Option<&[u8]>,
        randomized: bool,
        attached: bool,
    ) -> Result<Vec<u8>>;
    fn verify(pk: &[u8], message: &[u8], signature: &[u8], context: Option<&[u8]>) -> bool;
    fn open(signed: &[u8], pk: &[u8], context: Option<&[u8]>) -> Option<Vec<u8>>;
}

struct KeyMaterial {
    public: Vec<u8>,
    secret: Zeroizing<Vec<u8>>,
    seed: Zeroizing<[u8; 32]>,
}

macro_rules! impl_family {
    ($variant:ident, $module:ident) => {
        impl Family for $variant {
            fn keygen(seed: Option<&[u8]>) -> Result<KeyMaterial> {
                let pair = match seed {
                    Some(seed) => $variant::key_pair_from_seed(seed),
                    None => $variant::generate_key_pair(&mut rng()),
                }
                .map_err(|e| anyhow!("Key generation failed: {e}"))?;
                Ok(KeyMaterial {
                    public: pair.verification_key.as_bytes().to_vec(),
                    secret: Zeroizing::new(pair.signing_key.as_bytes().to_vec()),
                    seed: pair.seed.clone(),
                })
            }

            fn sign(
                sk: &[u8],
                message: &[u8],
                context: Option<&[u8]>,
                randomized: bool,
                attached: bool,
            ) -> Result<Vec<u8>> {
                let sk = qrypto::dsa::$module::SigningKey::from_bytes(sk)
                    .map_err(|e| anyhow!("Invalid signing key: {e}"))?;
                let mut rng = rng();
                let mode = if randomized {
                    SigningMode::Randomized(&mut rng)
                } else {
                    SigningMode::Deterministic
                };
                let out = if attached {
                    $variant::sign_attached(&sk, message, context, mode)
                } else {
                    $variant::sign_with(&sk, message, context, mode).map(|s| s.as_bytes().to_vec())
                };
                out.map_err(|e| anyhow!("Signing failed: {e}"))
            }

            fn verify(
                pk: &[u8],
                message: &[u8],
                signature: &[u8],
                context: Option<&[u8]>,
            ) -> bool {
                $variant::verify_bytes(pk, message, signature, context)
            }

            fn open(signed: &[u8], pk: &[u8], context: Option<&[u8]>) -> Option<Vec<u8>> {
                $variant::open_attached(signed, pk, context)
            }
        }
    };
}

impl_family!(MlDsa87, ml_dsa_87);
impl_family!(Dilithium5, dilithium5);

/// Generate a key pair for the specified algorithm
fn cmd_keygen(
    algo: Algorithm,
    output: &str,
    seed: Option<&HexBytes>,
    print_seed: bool,
    format: OutputFormat,
) -> Result<()> {
    info!(%algo, seeded = seed.is_some(), "generating key pair");

    let seed = seed.map(|s| s.0.as_slice());
    let keys = match algo {
        Algorithm::MlDsa87 => <MlDsa87 as Family>::keygen(seed)?,
        Algorithm::Dilithium5 => <Dilithium5 as Family>::keygen(seed)?,
    };

    let prefix = algo.pem_prefix();
    let pk_encoded = encode_output(&keys.public, format, &format!("{prefix} PUBLIC KEY"));
    let sk_encoded = Zeroizing::new(encode_output(
        &keys.secret,
        format,
        &format!("{prefix} SECRET KEY"),
    ));

    let pub_path = format!("{output}.pub");
    let sec_path = format!("{output}.sec");

    fs::write(&pub_path, &pk_encoded).context("Failed to write public key")?;
    fs::write(&sec_path, sk_encoded.as_bytes()).context("Failed to write secret key")?;

    debug!(
        public_key = keys.public.len(),
        secret_key = keys.secret.len(),
        "key sizes in bytes"
    );

    println!("Public key written to: {pub_path}");
    println!("Secret key written to: {sec_path}");
    if print_seed {
        println!("Seed: {}", hex::encode(&keys.seed[..]));
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_sign(
    key: &Path,
    message: &[u8],
    output: &Path,
    format: OutputFormat,
    explicit_algo: Option<Algorithm>,
    randomized: bool,
    context: Option<&[u8]>,
    attached: bool,
) -> Result<()> {
    let sk = read_decoded(key, "signing key")?;
    let algo = resolve_algorithm(explicit_algo, &[sk.label.as_deref()], None)?;

    info!(%algo, message_len = message.len(), randomized, attached, "signing");

    let signed = match algo {
        Algorithm::MlDsa87 => {
            <MlDsa87 as Family>::sign(&sk.bytes, message, context, randomized, attached)?
        }
        Algorithm::Dilithium5 => {
            <Dilithium5 as Family>::sign(&sk.bytes, message, context, randomized, attached)?
        }
    };

    let label = if attached {
        format!("{} SIGNED MESSAGE", algo.pem_prefix())
    } else {
        format!("{} SIGNATURE", algo.pem_prefix())
    };
    fs::write(output, encode_output(&signed, format, &label))
        .context("Failed to write signature")?;

    debug!(bytes = signed.len(), "signature written");
    println!("Signature written to: {}", output.display());

    Ok(())
}

fn cmd_verify(
    pubkey: &Path,
    message: &[u8],
    signature: &Path,
    explicit_algo: Option<Algorithm>,
    context: Option<&[u8]>,
) -> Result<()> {
    let pk = read_decoded(pubkey, "public key")?;
    let sig = read_decoded(signature, "signature")?;
    let algo = resolve_algorithm(
        explicit_algo,
        &[pk.label.as_deref(), sig.label.as_deref()],
        Algorithm::from_signature_size(sig.bytes.len()),
    )?;

    info!(%algo, message_len = message.len(), signature_len = sig.bytes.len(), "verifying");

    let valid = match algo {
        Algorithm::MlDsa87 => <MlDsa87 as Family>::verify(&pk.bytes, message, &sig.bytes, context),
        Algorithm::Dilithium5 => {
            <Dilithium5 as Family>::verify(&pk.bytes, message, &sig.bytes, context)
        }
    };

    if valid {
        println!("Signature is valid.");
        Ok(())
    } else {
        bail!("Signature verification failed.")
    }
}

fn cmd_open(
    pubkey: &Path,
    input: &Path,
    output: Option<&PathBuf>,
    explicit_algo: Option<Algorithm>,
    context: Option<&[u8]>,
) -> Result<()> {
    let pk = read_decoded(pubkey, "public key")?;
    let signed = read_decoded(input, "signed message")?;
    let algo = resolve_algorithm(
        explicit_algo,
        &[pk.label.as_deref(), signed.label.as_deref()],
        None,
    )?;

    info!(%algo, signed_len = signed.bytes.len(), "opening");

    let message = match algo {
        Algorithm::MlDsa87 => <MlDsa87 as Family>::open(&signed.bytes, &pk.bytes, context),
        Algorithm::Dilithium5 => <Dilithium5 as Family>::open(&signed.bytes, &pk.bytes, context),
    }
    .ok_or_else(|| anyhow!("Signature verification failed."))?;

    match output {
        Some(path) => {
            fs::write(path, &message).context("Failed to write message")?;
            println!("Message written to: {}", path.display());
        }
        None => io::stdout()
            .write_all(&message)
            .context("Failed to write message")?,
    }
    Ok(())
}

/// Display information about supported algorithms
fn cmd_info() {
    println!("Qrypto - Post-Quantum Lattice Signatures");
    println!();
    println!("Supported algorithms:");
    println!();
    println!(
        "    ml-dsa-87    FIPS 204, Security Level 5    PK: {}B  SK: {}B  SIG: {}B  {}",
        <MlDsa87 as ParameterSet>::PK_BYTES,
        <MlDsa87 as ParameterSet>::SK_BYTES,
        <MlDsa87 as ParameterSet>::SIG_BYTES,
        "(context, default \"ZOND\")",
    );
    println!(
        "    dilithium5   Round 3, Security Level 5     PK: {}B  SK: {}B  SIG: {}B  (no context)",
        <Dilithium5 as ParameterSet>::PK_BYTES,
        <Dilithium5 as ParameterSet>::SK_BYTES,
        <Dilithium5 as ParameterSet>::SIG_BYTES,
    );
    println!();
    println!("Output formats:");
    println!("    hex    - Hexadecimal encoding (default)");
    println!("    base64 - Base64 encoding");
    println!("    pem    - PEM format with headers");
}

/// Generate shell completions
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "qrypto", &mut io::stdout());
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Keygen {
            algo,
            output,
            seed,
            print_seed,
            format,
        } => cmd_keygen(algo, &output, seed.as_ref(), print_seed, format),

        Commands::Sign {
            key,
            input,
            message_hex,
            output,
            format,
            algo,
            randomized,
            context,
            attached,
        } => {
            let message = read_message(input.as_ref(), message_hex.as_ref())?;
            cmd_sign(
                &key,
                &message,
                &output,
                format,
                algo,
                randomized,
                context.bytes(),
                attached,
            )
        }

        Commands::Verify {
            pubkey,
            input,
            message_hex,
            signature,
            algo,
            context,
        } => {
            let message = read_message(input.as_ref(), message_hex.as_ref())?;
            cmd_verify(&pubkey, &message, &signature, algo, context.bytes())
        }

        Commands::Open {
            pubkey,
            input,
            output,
            algo,
            context,
        } => cmd_open(&pubkey, &input, output.as_ref(), algo, context.bytes()),

        Commands::Info => {
            cmd_info();
            Ok(())
        }

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
