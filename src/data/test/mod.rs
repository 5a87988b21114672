mod bot_admin;
