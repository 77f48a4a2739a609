//! # Help Text
//!
//! Welcome and help messages for bot commands.
//! Displayed to the user via the `.start` and `.help` commands.

pub const WELCOME: &str = concat!(
    "**👋 Welcome!**\n",
    "\n",
    "Get started:\n",
    "`.pools dai`\n",
    "`.deepest`\n",
    "`.dexag dai`\n",
    "`.paraswap dai`\n",
    "`.0x dai`\n",
    "`.feedback`\n",
    "`.help`\n"
);

pub const MAIN: &str = concat!(
    "**👉 With this bot you can...**\n",
    "\n",
    "See returns for Uniswap pools\n",
    "`.pools DAI`\n",
    "\n",
    "See the five deepest liquidity pools\n",
    "`.deepest`\n",
    "\n",
    "See the best [dex.ag](https://dex.ag) prices\n",
    "`.dexag DAI`\n",
    "`.dexag 500 DAI`\n",
    "`.dexag 500 DAI MKR`\n",
    "`.dexag ETH 1 MKR`\n",
    "\n",
    "See the best [1inch](https://1inch.exchange) prices\n",
    "`.1inch DAI`\n",
    "`.1inch 500 DAI`\n",
    "`.1inch 500 DAI MKR`\n",
    "\n",
    "See the best [paraswap](https://paraswap.io) prices\n",
    "`.paraswap DAI`\n",
    "`.paraswap 500 DAI`\n",
    "`.paraswap 500 DAI MKR`\n",
    "\n",
    "See the best [0x](https://0x.org) prices\n",
    "`.0x DAI`\n",
    "`.0x 500 DAI`\n",
    "`.0x 500 DAI MKR`\n",
    "`.0x ETH 1 MKR`\n",
    "\n",
    "Submit feedback\n",
    "`.feedback {your feedback}`\n"
);
