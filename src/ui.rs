pub fn render_store() -> String {
    STORE_HTML.to_string()
}

/// The funnel page boots from a server-rendered view of the initial state
/// (possibly seeded from the campaign query parameter).
pub fn render_funnel(initial_view_json: &str) -> String {
    FUNNEL_HTML.replace("{{INITIAL_VIEW}}", initial_view_json)
}

const STORE_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Loja - Bonés, Artes e Roupas</title>
  <style>
    :root {
      --bg: #f7f4ef;
      --ink: #26211c;
      --accent: #e2574c;
      --accent-2: #2f4858;
      --card: #ffffff;
      --shadow: 0 18px 44px rgba(47, 72, 88, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #f1e6d8);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
    }

    header.topbar {
      position: sticky;
      top: 0;
      z-index: 10;
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 16px 28px;
      background: rgba(255, 255, 255, 0.92);
      backdrop-filter: blur(8px);
      box-shadow: 0 2px 14px rgba(47, 72, 88, 0.1);
    }

    header.topbar h1 { margin: 0; font-size: 1.3rem; }

    .cart-toggle {
      position: relative;
      border: none;
      background: var(--accent-2);
      color: white;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 1rem;
      cursor: pointer;
    }

    .cart-count {
      position: absolute;
      top: -8px;
      right: -8px;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      min-width: 22px;
      height: 22px;
      display: none;
      align-items: center;
      justify-content: center;
      font-size: 0.8rem;
      font-weight: 700;
    }

    main { padding: 28px; max-width: 1080px; margin: 0 auto; }

    .products-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(230px, 1fr));
      gap: 20px;
    }

    .product-card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
      display: grid;
      gap: 10px;
      text-align: center;
    }

    .product-image { font-size: 3rem; }
    .product-name { margin: 0; font-size: 1.05rem; }
    .product-price { font-weight: 700; color: var(--accent-2); }

    .btn-add-cart {
      border: none;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
    }

    .cart-overlay {
      position: fixed;
      inset: 0;
      background: rgba(38, 33, 28, 0.45);
      opacity: 0;
      pointer-events: none;
      transition: opacity 200ms ease;
      z-index: 20;
    }

    .cart-overlay.active { opacity: 1; pointer-events: auto; }

    .cart-sidebar {
      position: fixed;
      top: 0;
      right: -380px;
      width: min(380px, 92vw);
      height: 100vh;
      background: white;
      box-shadow: -12px 0 30px rgba(47, 72, 88, 0.18);
      transition: right 250ms ease;
      z-index: 30;
      display: flex;
      flex-direction: column;
    }

    .cart-sidebar.active { right: 0; }

    .cart-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 18px 20px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.12);
    }

    .cart-header h2 { margin: 0; font-size: 1.1rem; }
    .cart-close { border: none; background: none; font-size: 1.4rem; cursor: pointer; }

    .cart-body { flex: 1; overflow-y: auto; padding: 16px 20px; }
    .cart-empty { text-align: center; color: #7a746d; padding-top: 40px; }

    .cart-item {
      display: flex;
      gap: 12px;
      padding: 12px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .cart-item-image { font-size: 2rem; }
    .cart-item-name { font-weight: 600; }
    .cart-item-price { color: #7a746d; font-size: 0.9rem; }

    .cart-item-controls {
      display: flex;
      align-items: center;
      gap: 8px;
      margin-top: 6px;
    }

    .quantity-btn {
      border: 1px solid rgba(47, 72, 88, 0.25);
      background: white;
      border-radius: 8px;
      width: 28px;
      height: 28px;
      cursor: pointer;
    }

    .btn-remove-item { border: none; background: none; cursor: pointer; font-size: 1rem; }

    .cart-footer {
      display: none;
      padding: 18px 20px;
      border-top: 1px solid rgba(47, 72, 88, 0.12);
    }

    .cart-total {
      display: flex;
      justify-content: space-between;
      font-weight: 700;
      margin-bottom: 12px;
    }

    .btn-pay {
      width: 100%;
      border: none;
      background: var(--accent-2);
      color: white;
      border-radius: 999px;
      padding: 12px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    .payment-modal {
      position: fixed;
      inset: 0;
      background: rgba(38, 33, 28, 0.55);
      display: none;
      align-items: center;
      justify-content: center;
      z-index: 40;
      padding: 18px;
    }

    .payment-modal.active { display: flex; }

    .payment-card {
      background: white;
      border-radius: 18px;
      padding: 26px;
      width: min(420px, 100%);
      display: grid;
      gap: 14px;
    }

    .payment-card h2 { margin: 0; }
    .payment-total { font-size: 1.3rem; font-weight: 700; color: var(--accent-2); }

    .payment-card label { font-size: 0.9rem; color: #5f5c57; }

    .payment-card input {
      width: 100%;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      font-size: 1rem;
    }

    .btn-submit-payment {
      border: none;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 12px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-submit-payment:disabled { opacity: 0.6; cursor: wait; }
    .payment-close { border: none; background: none; font-size: 1.3rem; cursor: pointer; justify-self: end; }

    .toast-container {
      position: fixed;
      bottom: 20px;
      right: 20px;
      display: grid;
      gap: 10px;
      z-index: 50;
    }

    .toast {
      background: var(--accent-2);
      color: white;
      border-radius: 12px;
      padding: 12px 18px;
      box-shadow: var(--shadow);
      animation: slide-in 250ms ease;
    }

    .toast.success { background: #2d7a4b; }
    .toast.warning { background: #b07d2a; }
    .toast.error { background: #c63b2b; }

    @keyframes slide-in {
      from { opacity: 0; transform: translateX(24px); }
      to { opacity: 1; transform: translateX(0); }
    }
  </style>
</head>
<body>
  <header class="topbar">
    <h1>Bonés, Artes &amp; Roupas</h1>
    <button class="cart-toggle" id="cartToggle" type="button">
      🛒 Carrinho
      <span class="cart-count" id="cartCount">0</span>
    </button>
  </header>

  <main>
    <div class="products-grid" id="productsGrid"></div>
  </main>

  <div class="cart-overlay" id="cartOverlay"></div>

  <aside class="cart-sidebar" id="cartSidebar">
    <div class="cart-header">
      <h2>Seu Carrinho</h2>
      <button class="cart-close" id="cartClose" type="button">✕</button>
    </div>
    <div class="cart-body">
      <div class="cart-empty" id="cartEmpty">O carrinho está vazio.</div>
      <div id="cartItems"></div>
    </div>
    <div class="cart-footer" id="cartFooter">
      <div class="cart-total">
        <span>Total</span>
        <span id="totalAmount">0 MT</span>
      </div>
      <button class="btn-pay" id="btnPay" type="button">Pagar com M-Pesa</button>
    </div>
  </aside>

  <div class="payment-modal" id="paymentModal">
    <div class="payment-card">
      <button class="payment-close" id="paymentClose" type="button">✕</button>
      <h2>Pagamento M-Pesa</h2>
      <div>Total a pagar: <span class="payment-total" id="modalTotal">0 MT</span></div>
      <form id="paymentForm">
        <label for="phoneNumber">Número de telefone (9 dígitos)</label>
        <input id="phoneNumber" name="phoneNumber" type="tel" inputmode="numeric"
               maxlength="9" placeholder="84 123 4567" autocomplete="tel" required />
        <button class="btn-submit-payment" id="btnSubmitPayment" type="submit">
          Confirmar Pagamento
        </button>
      </form>
    </div>
  </div>

  <div class="toast-container" id="toastContainer"></div>

  <script>
    const productsGrid = document.getElementById('productsGrid');
    const cartCount = document.getElementById('cartCount');
    const cartEmpty = document.getElementById('cartEmpty');
    const cartItems = document.getElementById('cartItems');
    const cartFooter = document.getElementById('cartFooter');
    const totalAmount = document.getElementById('totalAmount');
    const modalTotal = document.getElementById('modalTotal');
    const cartSidebar = document.getElementById('cartSidebar');
    const cartOverlay = document.getElementById('cartOverlay');
    const paymentModal = document.getElementById('paymentModal');
    const paymentForm = document.getElementById('paymentForm');
    const btnSubmitPayment = document.getElementById('btnSubmitPayment');
    const toastContainer = document.getElementById('toastContainer');

    let cartView = { items: [], item_count: 0, total: 0, total_display: '0 MT' };

    const formatMT = (value) => `${value.toLocaleString('pt-BR')} MT`;

    const showToast = (message, type) => {
      const toast = document.createElement('div');
      toast.className = `toast ${type || 'success'}`;
      toast.textContent = message;
      toastContainer.appendChild(toast);
      setTimeout(() => toast.remove(), 3000);
    };

    const renderProducts = (products) => {
      productsGrid.innerHTML = products.map((product) => `
        <div class="product-card">
          <div class="product-image">${product.glyph}</div>
          <h3 class="product-name">${product.name}</h3>
          <div class="product-price">${formatMT(product.price)}</div>
          <button class="btn-add-cart" data-id="${product.id}" type="button">
            Adicionar ao Carrinho
          </button>
        </div>
      `).join('');
    };

    const renderCart = (view) => {
      cartView = view;
      cartCount.textContent = view.item_count;
      cartCount.style.display = view.item_count > 0 ? 'flex' : 'none';

      if (view.items.length === 0) {
        cartEmpty.style.display = 'block';
        cartItems.innerHTML = '';
        cartFooter.style.display = 'none';
        return;
      }

      cartEmpty.style.display = 'none';
      cartFooter.style.display = 'block';
      totalAmount.textContent = view.total_display;
      modalTotal.textContent = view.total_display;

      cartItems.innerHTML = view.items.map((item) => `
        <div class="cart-item">
          <div class="cart-item-image">${item.glyph}</div>
          <div>
            <div class="cart-item-name">${item.name}</div>
            <div class="cart-item-price">${item.price_display}</div>
            <div class="cart-item-controls">
              <button class="quantity-btn" data-id="${item.product_id}"
                      data-quantity="${item.quantity - 1}" type="button">-</button>
              <span>${item.quantity}</span>
              <button class="quantity-btn" data-id="${item.product_id}"
                      data-quantity="${item.quantity + 1}" type="button">+</button>
              <button class="btn-remove-item" data-remove="${item.product_id}"
                      type="button" title="Remover">🗑️</button>
            </div>
          </div>
        </div>
      `).join('');
    };

    const api = async (path, body) => {
      const res = await fetch(path, {
        method: body === undefined ? 'GET' : 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'Erro inesperado.');
      }
      return res.json();
    };

    const loadProducts = async () => {
      renderProducts(await api('/api/products'));
    };

    const loadCart = async () => {
      renderCart(await api('/api/cart'));
    };

    const addToCart = async (productId) => {
      renderCart(await api('/api/cart/add', { product_id: productId }));
      showToast('Produto adicionado ao carrinho!', 'success');
    };

    const setQuantity = async (productId, quantity) => {
      renderCart(await api('/api/cart/quantity', { product_id: productId, quantity }));
    };

    const removeFromCart = async (productId) => {
      renderCart(await api('/api/cart/remove', { product_id: productId }));
      showToast('Produto removido do carrinho', 'warning');
    };

    const openCart = () => {
      cartSidebar.classList.add('active');
      cartOverlay.classList.add('active');
    };

    const closeCart = () => {
      cartSidebar.classList.remove('active');
      cartOverlay.classList.remove('active');
    };

    const openPaymentModal = () => paymentModal.classList.add('active');
    const closePaymentModal = () => paymentModal.classList.remove('active');

    productsGrid.addEventListener('click', (event) => {
      const button = event.target.closest('.btn-add-cart');
      if (button) {
        addToCart(Number(button.dataset.id)).catch((err) => showToast(err.message, 'error'));
      }
    });

    cartItems.addEventListener('click', (event) => {
      const quantityBtn = event.target.closest('.quantity-btn');
      if (quantityBtn) {
        setQuantity(Number(quantityBtn.dataset.id), Number(quantityBtn.dataset.quantity))
          .catch((err) => showToast(err.message, 'error'));
        return;
      }
      const removeBtn = event.target.closest('.btn-remove-item');
      if (removeBtn) {
        removeFromCart(Number(removeBtn.dataset.remove))
          .catch((err) => showToast(err.message, 'error'));
      }
    });

    document.getElementById('cartToggle').addEventListener('click', openCart);
    document.getElementById('cartClose').addEventListener('click', closeCart);
    cartOverlay.addEventListener('click', closeCart);

    document.getElementById('btnPay').addEventListener('click', () => {
      closeCart();
      setTimeout(openPaymentModal, 300);
    });

    document.getElementById('paymentClose').addEventListener('click', closePaymentModal);
    paymentModal.addEventListener('click', (event) => {
      if (event.target === paymentModal) {
        closePaymentModal();
      }
    });

    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape') {
        closeCart();
        closePaymentModal();
      }
    });

    paymentForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      const phoneNumber = document.getElementById('phoneNumber').value.trim();

      if (!/^\d{9}$/.test(phoneNumber)) {
        showToast('Por favor, insira um número de telefone válido (9 dígitos)', 'error');
        return;
      }

      btnSubmitPayment.disabled = true;
      btnSubmitPayment.textContent = 'Processando...';

      try {
        const data = await api('/api/checkout', { phone_number: phoneNumber });
        if (data.success) {
          showToast(data.message, 'success');
          setTimeout(() => {
            loadCart().catch(() => {});
            closePaymentModal();
            closeCart();
            paymentForm.reset();
          }, 2000);
        } else {
          showToast(data.message || 'Erro ao processar pagamento. Tente novamente.', 'error');
        }
      } catch (err) {
        showToast('Erro de conexão. Verifique se o servidor está rodando.', 'error');
      } finally {
        btnSubmitPayment.disabled = false;
        btnSubmitPayment.textContent = 'Confirmar Pagamento';
      }
    });

    Promise.all([loadProducts(), loadCart()])
      .catch((err) => showToast(err.message, 'error'));
  </script>
</body>
</html>
"#;

const FUNNEL_HTML: &str = r##"<!DOCTYPE html>
<html lang="pt">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Monte o Seu Plano de Treino</title>
  <style>
    :root {
      --bg: #f4f7f6;
      --ink: #22302c;
      --accent: #1f8a5d;
      --accent-2: #2f4858;
      --card: #ffffff;
      --shadow: 0 18px 44px rgba(31, 138, 93, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e6f2ec);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 28px 16px 48px;
    }

    .funil {
      width: min(720px, 100%);
      display: grid;
      gap: 18px;
    }

    .progress-track {
      height: 8px;
      background: rgba(47, 72, 88, 0.12);
      border-radius: 999px;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      background: var(--accent);
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .total-parcial {
      display: none;
      justify-content: space-between;
      background: var(--card);
      border-radius: 14px;
      padding: 12px 18px;
      box-shadow: var(--shadow);
      font-weight: 600;
    }

    .total-parcial .value { color: var(--accent); }

    .funil-step {
      display: none;
      background: var(--card);
      border-radius: 20px;
      padding: 26px;
      box-shadow: var(--shadow);
    }

    .funil-step.active { display: block; }
    .funil-step h2 { margin-top: 0; }
    .funil-step .hint { color: #61706a; font-size: 0.95rem; }

    .options {
      display: grid;
      gap: 12px;
      margin-top: 16px;
    }

    .option-card {
      border: 2px solid rgba(47, 72, 88, 0.15);
      border-radius: 14px;
      padding: 16px;
      cursor: pointer;
      transition: border-color 150ms ease, transform 150ms ease;
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .option-card:hover { transform: translateY(-2px); }
    .option-card.selected { border-color: var(--accent); background: rgba(31, 138, 93, 0.07); }
    .option-card .price { font-weight: 700; color: var(--accent-2); white-space: nowrap; }

    .funil-navigation {
      display: none;
      justify-content: space-between;
      gap: 12px;
    }

    button.nav {
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-voltar { background: rgba(47, 72, 88, 0.12); color: var(--ink); }
    .btn-avancar { background: var(--accent); color: white; }
    .btn-continuar {
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      margin-top: 16px;
    }

    form.dados { display: grid; gap: 12px; margin-top: 16px; }
    form.dados label { font-size: 0.9rem; color: #5f6c67; }

    form.dados input {
      width: 100%;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      font-size: 1rem;
    }

    .resumo-item {
      display: flex;
      justify-content: space-between;
      gap: 14px;
      padding: 8px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .resumo-item-label { color: #5f6c67; }
    .resumo-item-value { font-weight: 600; text-align: right; }

    .resumo-total {
      display: flex;
      justify-content: space-between;
      margin-top: 14px;
      font-size: 1.15rem;
      font-weight: 700;
      color: var(--accent);
    }

    .whatsapp-final { text-align: center; padding: 18px 0; }
    .whatsapp-final .big { font-size: 3rem; }
  </style>
</head>
<body>
  <div class="funil">
    <div class="progress-track">
      <div class="progress-fill" id="progressFill"></div>
    </div>

    <div class="total-parcial" id="totalParcial">
      <span>Total mensal estimado</span>
      <span class="value" id="totalValue">700 MT</span>
    </div>

    <section class="funil-step" id="step1">
      <h2>Qual é o seu objetivo principal?</h2>
      <div class="options">
        <div class="option-card" data-field="objective" data-value="reabilitacao">
          <span>Reabilitação / Dor</span>
        </div>
        <div class="option-card" data-field="objective" data-value="idosos">
          <span>Saúde e Autonomia (Idosos)</span>
        </div>
        <div class="option-card" data-field="objective" data-value="atletas">
          <span>Performance Esportiva (Atletas)</span>
        </div>
      </div>
    </section>

    <section class="funil-step" id="step2">
      <h2>Avaliação funcional + bioimpedância</h2>
      <p class="hint">
        Todo plano começa com uma avaliação completa (700 MT). Ela define o
        ponto de partida e garante um treino seguro e personalizado.
      </p>
      <button class="btn-continuar" id="btnAvaliacao" type="button">Continuar →</button>
    </section>

    <section class="funil-step" id="step3">
      <h2>Quantas sessões por semana?</h2>
      <div class="options">
        <div class="option-card" data-field="frequency" data-value="1x">
          <span>1x por semana</span><span class="price">4.000 MT/mês</span>
        </div>
        <div class="option-card" data-field="frequency" data-value="2x">
          <span>2x por semana</span><span class="price">7.000 MT/mês</span>
        </div>
        <div class="option-card" data-field="frequency" data-value="3x">
          <span>3x por semana</span><span class="price">9.000 MT/mês</span>
        </div>
        <div class="option-card" data-field="frequency" data-value="5x">
          <span>5x por semana</span><span class="price">12.000 MT/mês</span>
        </div>
      </div>
    </section>

    <section class="funil-step" id="step4">
      <h2>Qual modalidade prefere?</h2>
      <div class="options">
        <div class="option-card" data-field="delivery" data-value="presencial">
          <span>Presencial Domiciliar</span><span class="price">incluído</span>
        </div>
        <div class="option-card" data-field="delivery" data-value="hibrido">
          <span>Híbrido (Presencial + Vídeos)</span><span class="price">+1.500 MT/mês</span>
        </div>
      </div>
    </section>

    <section class="funil-step" id="step5">
      <h2>Deseja foco específico?</h2>
      <p class="hint">Protocolo dedicado a uma queixa ou meta concreta.</p>
      <div class="options">
        <div class="option-card" data-field="specific_focus" data-value="sim">
          <span>Sim</span><span class="price">+1.000 MT/mês</span>
        </div>
        <div class="option-card" data-field="specific_focus" data-value="nao">
          <span>Não</span>
        </div>
      </div>
    </section>

    <section class="funil-step" id="step6">
      <h2>Deseja suporte contínuo?</h2>
      <p class="hint">Acompanhamento por mensagem entre as sessões.</p>
      <div class="options">
        <div class="option-card" data-field="extended_support" data-value="sim">
          <span>Sim</span><span class="price">+800 MT/mês</span>
        </div>
        <div class="option-card" data-field="extended_support" data-value="nao">
          <span>Não</span>
        </div>
      </div>
    </section>

    <section class="funil-step" id="step7">
      <h2>Resumo do Seu Plano</h2>
      <div id="resumoFinal"></div>
    </section>

    <section class="funil-step" id="step8">
      <h2>Quase lá! Seus dados de contacto</h2>
      <form class="dados" id="formDados">
        <label for="nome">Nome</label>
        <input id="nome" name="nome" type="text" autocomplete="name" required />
        <label for="whatsapp">WhatsApp (9 dígitos)</label>
        <input id="whatsapp" name="whatsapp" type="tel" inputmode="numeric"
               maxlength="9" placeholder="841234567" required />
        <label for="bairro">Bairro</label>
        <input id="bairro" name="bairro" type="text" required />
      </form>
    </section>

    <section class="funil-step" id="step9">
      <div class="whatsapp-final">
        <div class="big">✅</div>
        <h2>Plano pronto!</h2>
        <p class="hint">
          Abrindo o WhatsApp com a sua mensagem... Se nada acontecer,
          <a id="whatsappLink" href="#" target="_blank" rel="noopener">clique aqui</a>.
        </p>
      </div>
    </section>

    <div class="funil-navigation" id="funilNavigation">
      <button class="nav btn-voltar" id="btnVoltar" type="button">← Voltar</button>
      <button class="nav btn-avancar" id="btnAvancar" type="button">Avançar →</button>
    </div>
  </div>

  <script>
    let view = {{INITIAL_VIEW}};
    let whatsappOpened = false;

    const progressFill = document.getElementById('progressFill');
    const totalParcial = document.getElementById('totalParcial');
    const totalValue = document.getElementById('totalValue');
    const funilNavigation = document.getElementById('funilNavigation');
    const btnVoltar = document.getElementById('btnVoltar');
    const btnAvancar = document.getElementById('btnAvancar');
    const resumoFinal = document.getElementById('resumoFinal');
    const whatsappLink = document.getElementById('whatsappLink');
    const steps = Array.from(document.querySelectorAll('.funil-step'));
    const optionCards = Array.from(document.querySelectorAll('.option-card'));

    const eventBuilders = {
      objective: (value) => ({ type: 'select_objective', objective: value }),
      frequency: (value) => ({ type: 'select_frequency', frequency: value }),
      delivery: (value) => ({ type: 'select_delivery', delivery: value }),
      specific_focus: (value) => ({ type: 'set_specific_focus', enabled: value === 'sim' }),
      extended_support: (value) => ({ type: 'set_extended_support', enabled: value === 'sim' })
    };

    const selectedValue = (field) => {
      const state = view.state;
      switch (field) {
        case 'objective': return state.objective;
        case 'frequency': return state.frequency;
        case 'delivery': return state.delivery;
        case 'specific_focus': return state.specific_focus ? 'sim' : 'nao';
        case 'extended_support': return state.extended_support ? 'sim' : 'nao';
      }
    };

    const markSelections = () => {
      optionCards.forEach((card) => {
        card.classList.toggle(
          'selected',
          card.dataset.value === selectedValue(card.dataset.field)
        );
      });
    };

    const renderSummary = () => {
      if (!view.summary) {
        return;
      }
      const lines = view.summary.map((line) => `
        <div class="resumo-item">
          <span class="resumo-item-label">${line.label}:</span>
          <span class="resumo-item-value">${line.value}</span>
        </div>
      `).join('');
      resumoFinal.innerHTML = `${lines}
        <div class="resumo-total">
          <span>Total mensal estimado:</span>
          <span>${view.total_display}</span>
        </div>`;
    };

    const render = () => {
      steps.forEach((step) => {
        step.classList.toggle('active', step.id === `step${view.step}`);
      });
      progressFill.style.width = `${view.progress_percent}%`;

      totalParcial.style.display = view.step >= 2 ? 'flex' : 'none';
      totalValue.textContent = view.total_display;

      const hideNav = view.step === 1 || view.step === 2 || view.step === 9;
      funilNavigation.style.display = hideNav ? 'none' : 'flex';
      btnAvancar.textContent = view.step === 8 ? 'Enviar para WhatsApp →' : 'Avançar →';

      markSelections();
      renderSummary();

      if (view.step === 9 && view.whatsapp_url) {
        whatsappLink.href = view.whatsapp_url;
        if (!whatsappOpened) {
          whatsappOpened = true;
          setTimeout(() => window.open(view.whatsapp_url, '_blank'), 2000);
        }
      }

      window.scrollTo({ top: 0, behavior: 'smooth' });
    };

    const sendEvent = async (event) => {
      const res = await fetch('/api/funil/event', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ state: view.state, event })
      });
      if (!res.ok) {
        alert(await res.text());
        return null;
      }
      return res.json();
    };

    const applyEvent = async (event, delayMs) => {
      const next = await sendEvent(event);
      if (!next) {
        return;
      }
      view = next;
      if (delayMs) {
        setTimeout(render, delayMs);
      } else {
        render();
      }
    };

    optionCards.forEach((card) => {
      card.addEventListener('click', () => {
        const step = card.closest('.funil-step');
        step.querySelectorAll('.option-card').forEach((c) => c.classList.remove('selected'));
        card.classList.add('selected');
        const event = eventBuilders[card.dataset.field](card.dataset.value);
        applyEvent(event, 300).catch(() => {});
      });
    });

    const submitContact = () => {
      applyEvent({
        type: 'submit_contact',
        name: document.getElementById('nome').value,
        whatsapp: document.getElementById('whatsapp').value,
        bairro: document.getElementById('bairro').value
      }).catch(() => {});
    };

    document.getElementById('btnAvaliacao').addEventListener('click', () => {
      applyEvent({ type: 'advance' }).catch(() => {});
    });

    btnAvancar.addEventListener('click', () => {
      if (view.step === 8) {
        submitContact();
      } else {
        applyEvent({ type: 'advance' }).catch(() => {});
      }
    });

    btnVoltar.addEventListener('click', () => {
      applyEvent({ type: 'back' }).catch(() => {});
    });

    document.getElementById('formDados').addEventListener('submit', (event) => {
      event.preventDefault();
      submitContact();
    });

    render();
  </script>
</body>
</html>
"##;
