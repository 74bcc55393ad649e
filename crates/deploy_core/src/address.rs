use rand::Rng;
use shared::domain::{ContractAddress, ADDRESS_BYTES};
use url::Url;

/// Random display address. Not derived from any key and not a real account.
pub fn generate_address<R: Rng + ?Sized>(rng: &mut R) -> ContractAddress {
    let mut bytes = [0u8; ADDRESS_BYTES];
    rng.fill_bytes(&mut bytes);
    ContractAddress::from_bytes(bytes)
}

/// `<base>/address/<address>` on the configured block explorer.
pub fn explorer_address_url(base: &Url, address: &ContractAddress) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("address/{address}"))
}
