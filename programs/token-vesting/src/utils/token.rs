//! SPL token plumbing shared by the release paths.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo, Token};

/// Mints `amount` to `to`, signed by the config PDA (the mint authority).
pub fn mint_with_config_authority<'info>(
    token_program: &Program<'info, Token>,
    mint: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    config: &AccountInfo<'info>,
    config_bump: u8,
    amount: u64,
) -> Result<()> {
    let signer_seeds: &[&[&[u8]]] = &[&[b"config", &[config_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: mint.clone(),
                to: to.clone(),
                authority: config.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// ATA derivation: PDA(owner, token_program_id, mint) under the associated
/// token program.
pub fn expected_ata_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[
        owner.as_ref(),
        anchor_spl::token::ID.as_ref(),
        mint.as_ref(),
    ];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}
